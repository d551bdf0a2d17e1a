//! Request submission command.

use std::path::Path;

use clap::Args;

use crate::output::{self, OutputFormat};
use rma_core::error::{AppError, ErrorKind};
use rma_service::ticket::{CATEGORIES, STORES};
use rma_service::{ActorContext, Attachment, SubmissionForm};

/// Arguments for the submit command. Missing required values are prompted for.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// First name
    #[arg(long)]
    pub name: Option<String>,
    /// Surname
    #[arg(long)]
    pub surname: Option<String>,
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Purchase date (YYYY-MM-DD)
    #[arg(long)]
    pub purchase_date: Option<String>,
    /// Product code
    #[arg(long)]
    pub product: Option<String>,
    /// Product category
    #[arg(long)]
    pub category: Option<String>,
    /// Store of purchase
    #[arg(long)]
    pub store: Option<String>,
    /// `repair` or `return`
    #[arg(long = "type")]
    pub request_type: Option<String>,
    /// Description of the problem
    #[arg(long)]
    pub issue: Option<String>,
    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
    /// Receipt number
    #[arg(long)]
    pub receipt: Option<String>,
    /// Photo or receipt to attach
    #[arg(long)]
    pub attachment: Option<String>,
    /// Submit anyway if the attachment upload fails
    #[arg(long)]
    pub continue_without_file: bool,
}

/// Execute the submit command
pub async fn execute(
    args: &SubmitArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let portal = super::connect(config_path)?;
    let form = collect_form(args)?;

    let attachment = match &args.attachment {
        Some(path) => Some(read_attachment(path).await?),
        None => None,
    };

    let actor = ActorContext::customer().named(form.full_name());
    let outcome = match portal
        .tickets
        .submit(&form, attachment.as_ref(), args.continue_without_file, &actor)
        .await
    {
        Err(e) if e.kind == ErrorKind::Upload => {
            output::print_warning(&e.message);
            if !super::confirm("Submit without the attachment?", false)? {
                return Ok(());
            }
            portal
                .tickets
                .submit(&form, attachment.as_ref(), true, &actor)
                .await?
        }
        other => other?,
    };

    if format == OutputFormat::Json {
        output::print_json(&outcome);
        return Ok(());
    }

    output::print_success("Your request has been submitted successfully!");
    output::print_kv("RMA", &outcome.ticket.rma);
    output::print_kv("Type", outcome.ticket.record_type.as_str());
    output::print_kv("Status", &outcome.ticket.status);
    output::print_kv("Eligibility", &outcome.verdict.message);
    if let Some(upload) = &outcome.upload {
        output::print_kv("Attachment", &upload.url);
    }
    output::print_kv("Track at", &outcome.tracking_path);
    if outcome.needs_review {
        output::print_warning("The request will be reviewed before it is accepted.");
    }

    Ok(())
}

fn collect_form(args: &SubmitArgs) -> Result<SubmissionForm, AppError> {
    Ok(SubmissionForm {
        name: required(&args.name, "First name")?,
        surname: required(&args.surname, "Surname")?,
        email: required(&args.email, "Email")?,
        phone_number: required(&args.phone, "Phone number")?,
        purchase_date: required(&args.purchase_date, "Purchase date (YYYY-MM-DD)")?,
        product_code: required(&args.product, "Product code")?,
        category: choose(&args.category, "Category", &CATEGORIES)?,
        store: choose(&args.store, "Store", &STORES)?,
        request_type: choose(&args.request_type, "Request type", &["repair", "return"])?,
        issue_description: required(&args.issue, "Describe the issue")?,
        address: args.address.clone(),
        receipt_number: args.receipt.clone(),
    })
}

fn required(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e))),
    }
}

fn choose(value: &Option<String>, prompt: &str, options: &[&str]) -> Result<String, AppError> {
    if let Some(v) = value {
        return Ok(v.clone());
    }
    let index = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    Ok(options[index].to_string())
}

async fn read_attachment(path: &str) -> Result<Attachment, AppError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| AppError::validation(format!("Cannot read attachment '{}': {}", path, e)))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let attachment = Attachment::new(file_name, metadata.len());
    attachment.check_size()?;
    Ok(attachment)
}
