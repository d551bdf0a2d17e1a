//! Kanban board projection and drag-and-drop transitions.

pub mod board;
pub mod transition;

pub use board::{Board, Column, matches_search};
pub use transition::{DragRequest, KanbanController, TransitionPlan, plan_transition};
