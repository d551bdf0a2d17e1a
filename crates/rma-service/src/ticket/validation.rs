//! Submission form validation.

use serde::{Deserialize, Serialize};

use rma_core::error::{AppError, FieldErrors};
use rma_core::result::AppResult;
use rma_entity::ticket::RecordType;

/// Accepted product categories.
pub const CATEGORIES: [&str; 6] = [
    "Laptop",
    "Smartphone",
    "TV",
    "Home Appliance",
    "Accessory",
    "Other",
];

/// Accepted stores.
pub const STORES: [&str; 6] = [
    "Thessaloniki",
    "Athens",
    "Larisa",
    "Patra",
    "Heraklion",
    "Online Store",
];

const EMAIL_SUFFIXES: [&str; 4] = [".com", ".com.gr", ".edu.gr", ".gr"];

/// A customer's repair or return request as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    /// Customer first name.
    pub name: String,
    /// Customer surname.
    pub surname: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone_number: String,
    /// `YYYY-MM-DD`.
    pub purchase_date: String,
    /// Product code as printed on the box.
    pub product_code: String,
    /// One of [`CATEGORIES`].
    pub category: String,
    /// One of [`STORES`].
    pub store: String,
    /// `repair` or `return`.
    pub request_type: String,
    /// What is wrong with the product.
    pub issue_description: String,
    /// Postal address for pickup or delivery.
    #[serde(default)]
    pub address: Option<String>,
    /// Receipt number, when the customer has one.
    #[serde(default)]
    pub receipt_number: Option<String>,
}

impl SubmissionForm {
    /// The customer's full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.surname.trim())
    }

    fn required(&self) -> [(&'static str, &'static str, &str); 10] {
        [
            ("name", "Name", &self.name),
            ("surname", "Surname", &self.surname),
            ("email", "Email", &self.email),
            ("phone_number", "Phone Number", &self.phone_number),
            ("purchase_date", "Purchase Date", &self.purchase_date),
            ("product_code", "Product Code", &self.product_code),
            ("category", "Category", &self.category),
            ("store", "Store", &self.store),
            ("request_type", "Request Type", &self.request_type),
            ("issue_description", "Issue Description", &self.issue_description),
        ]
    }

    /// Check every field. Returns the request type on success, or a
    /// validation error carrying one message per bad field.
    pub fn validate(&self) -> AppResult<RecordType> {
        let mut fields = FieldErrors::new();
        for (key, label, value) in self.required() {
            if value.trim().is_empty() {
                fields.insert(key.to_string(), format!("{label} is required."));
            }
        }
        if !fields.is_empty() {
            return Err(AppError::validation_fields(
                "Please fill in all required fields.",
                fields,
            ));
        }

        if let Some(message) = check_email(&self.email) {
            fields.insert("email".to_string(), message.to_string());
            return Err(AppError::validation_fields("Please fix the email field.", fields));
        }

        if !is_valid_phone(&self.phone_number) {
            fields.insert(
                "phone_number".to_string(),
                "Phone Number may contain only digits, spaces and a leading +.".to_string(),
            );
        }
        if !CATEGORIES.contains(&self.category.trim()) {
            fields.insert(
                "category".to_string(),
                format!("Category must be one of: {}.", CATEGORIES.join(", ")),
            );
        }
        if !STORES.contains(&self.store.trim()) {
            fields.insert(
                "store".to_string(),
                format!("Store must be one of: {}.", STORES.join(", ")),
            );
        }
        let record_type = self.request_type.parse::<RecordType>();
        if let Err(e) = &record_type {
            fields.insert("request_type".to_string(), e.message.clone());
        }

        match record_type {
            Ok(record_type) if fields.is_empty() => Ok(record_type),
            _ => Err(AppError::validation_fields(
                "Please fix the highlighted fields.",
                fields,
            )),
        }
    }
}

/// Check an email address. Returns the problem, if any.
pub fn check_email(email: &str) -> Option<&'static str> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Some("Email is required.");
    }
    if email.split('@').count() != 2 {
        return Some("Email must contain exactly one @ symbol.");
    }
    if !EMAIL_SUFFIXES.iter().any(|suffix| email.ends_with(suffix)) {
        return Some("Email must end with .com or .com.gr or .edu.gr or .gr.");
    }
    None
}

/// Digits and spaces, with at most one `+` and only in front.
fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SubmissionForm {
        SubmissionForm {
            name: "Maria".to_string(),
            surname: "Papadopoulou".to_string(),
            email: "maria@example.gr".to_string(),
            phone_number: "+30 6900000000".to_string(),
            purchase_date: "2025-01-10".to_string(),
            product_code: "LAP-123".to_string(),
            category: "Laptop".to_string(),
            store: "Athens".to_string(),
            request_type: "repair".to_string(),
            issue_description: "Screen flickers".to_string(),
            ..SubmissionForm::default()
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(form().validate().expect("valid"), RecordType::Repair);
        assert_eq!(form().full_name(), "Maria Papadopoulou");
    }

    #[test]
    fn test_missing_fields_each_get_a_message() {
        let err = SubmissionForm::default().validate().expect_err("empty form");
        assert_eq!(err.message, "Please fill in all required fields.");
        assert_eq!(err.fields.len(), 10);
        assert_eq!(err.field("phone_number"), Some("Phone Number is required."));
        assert_eq!(err.field("issue_description"), Some("Issue Description is required."));
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(check_email("a@b.com"), None);
        assert_eq!(check_email(" A@B.EDU.GR "), None);
        assert_eq!(check_email(""), Some("Email is required."));
        assert_eq!(check_email("a@b@c.gr"), Some("Email must contain exactly one @ symbol."));
        assert_eq!(check_email("ab.gr"), Some("Email must contain exactly one @ symbol."));
        assert_eq!(
            check_email("a@b.org"),
            Some("Email must end with .com or .com.gr or .edu.gr or .gr.")
        );
    }

    #[test]
    fn test_bad_email_blocks() {
        let mut f = form();
        f.email = "maria@example.org".to_string();
        let err = f.validate().expect_err("bad email");
        assert_eq!(err.message, "Please fix the email field.");
        assert!(err.field("email").is_some());
    }

    #[test]
    fn test_phone_and_lists() {
        let mut f = form();
        f.phone_number = "69-00".to_string();
        f.category = "Drone".to_string();
        f.store = "Sparta".to_string();
        f.request_type = "exchange".to_string();
        let err = f.validate().expect_err("bad fields");
        for key in ["phone_number", "category", "store", "request_type"] {
            assert!(err.field(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_plus_only_in_front() {
        assert!(is_valid_phone("+30 210 0000000"));
        assert!(is_valid_phone("2100000000"));
        assert!(!is_valid_phone("30+210"));
        assert!(!is_valid_phone("++30"));
        assert!(!is_valid_phone("+"));
    }
}
