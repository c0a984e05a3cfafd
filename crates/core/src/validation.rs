//! Form drafts and field-level validation.
//!
//! A draft holds raw, possibly-invalid input. [`Draft::validate`] returns
//! every rule the draft breaks, keyed by field name; [`Draft::build`] turns
//! a valid draft into the request payload. [`FormState`] adds the
//! "touched" bookkeeping a form needs: an attempted submit of an invalid
//! draft marks every field touched so all messages become visible.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rust_decimal::Decimal;

use crate::models::{
    CategoryRequest, LoginRequest, MovementKind, MovementRequest, Product, ProductRequest,
    RegisterRequest,
};
use crate::types::{CategoryId, Email, EmailError, Price, ProductId, Role};

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("is required")]
    Required,
    #[error("must be at least {min} characters")]
    MinLength { min: usize },
    #[error("must be at least {min}")]
    Min { min: String },
    #[error("must be at most {max}")]
    Max { max: String },
    #[error("{0}")]
    Email(EmailError),
}

/// Field errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<FieldError>>,
}

impl ValidationErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a broken rule for `field`.
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.fields.entry(field).or_default().push(error);
    }

    /// Whether no rule is broken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Errors for one field.
    #[must_use]
    pub fn field(&self, field: &str) -> &[FieldError] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether `field` has at least one error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of fields with errors, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Iterate `(field, errors)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[FieldError])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Keep only the fields in `visible`.
    #[must_use]
    pub fn restricted_to(&self, visible: &BTreeSet<&'static str>) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| visible.contains(*k))
                .map(|(k, v)| (*k, v.clone()))
                .collect(),
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in &self.fields {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field} {error}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A form's raw input.
pub trait Draft {
    /// Payload produced by a valid draft.
    type Output;

    /// Every field the form shows, used to mark all fields touched.
    const FIELDS: &'static [&'static str];

    /// Check every rule.
    fn validate(&self) -> ValidationErrors;

    /// Build the payload.
    ///
    /// # Errors
    ///
    /// Returns the full error set if any rule is broken.
    fn build(&self) -> Result<Self::Output, ValidationErrors>;
}

/// A draft plus the set of fields the user has touched.
#[derive(Debug, Clone, Default)]
pub struct FormState<D> {
    pub draft: D,
    touched: BTreeSet<&'static str>,
}

impl<D: Draft> FormState<D> {
    /// Wrap a draft with nothing touched.
    #[must_use]
    pub const fn new(draft: D) -> Self {
        Self {
            draft,
            touched: BTreeSet::new(),
        }
    }

    /// Mark one field touched.
    pub fn touch(&mut self, field: &'static str) {
        self.touched.insert(field);
    }

    /// Mark every field touched.
    pub fn mark_all_touched(&mut self) {
        self.touched.extend(D::FIELDS.iter().copied());
    }

    /// Whether `field` has been touched.
    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Whether the draft currently passes every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.draft.validate().is_empty()
    }

    /// Errors the form should display: only those on touched fields.
    #[must_use]
    pub fn visible_errors(&self) -> ValidationErrors {
        self.draft.validate().restricted_to(&self.touched)
    }

    /// Attempt a submit.
    ///
    /// # Errors
    ///
    /// On an invalid draft, marks every field touched and returns the errors;
    /// nothing should be sent.
    pub fn submit(&mut self) -> Result<D::Output, ValidationErrors> {
        self.draft.build().inspect_err(|_| self.mark_all_touched())
    }
}

fn require_text(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, FieldError::Required);
        false
    } else {
        true
    }
}

fn min_length(errors: &mut ValidationErrors, field: &'static str, value: &str, min: usize) {
    if !value.is_empty() && value.chars().count() < min {
        errors.add(field, FieldError::MinLength { min });
    }
}

fn count_in_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<i64>,
    min: i64,
) -> Option<u32> {
    let Some(value) = value else {
        errors.add(field, FieldError::Required);
        return None;
    };
    if value < min {
        errors.add(field, FieldError::Min { min: min.to_string() });
        return None;
    }
    u32::try_from(value).map_or_else(
        |_| {
            errors.add(field, FieldError::Max { max: u32::MAX.to_string() });
            None
        },
        Some,
    )
}

fn email_field(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<Email> {
    if !require_text(errors, field, value) {
        return None;
    }
    Email::parse(value)
        .map_err(|e| errors.add(field, FieldError::Email(e)))
        .ok()
}

fn optional_text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

// =============================================================================
// Product
// =============================================================================

/// Raw input of the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub image_url: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category_id: None,
            price: Some(Decimal::ZERO),
            stock: Some(0),
            image_url: String::new(),
        }
    }
}

impl ProductDraft {
    /// Minimum name length.
    pub const NAME_MIN_LENGTH: usize = 3;

    /// Draft pre-filled from an existing product (edit mode).
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.category_id,
            price: Some(product.price.amount()),
            stock: Some(i64::from(product.stock)),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    fn check(&self) -> (ValidationErrors, Option<Price>, Option<u32>) {
        let mut errors = ValidationErrors::new();

        if require_text(&mut errors, "name", &self.name) {
            min_length(&mut errors, "name", &self.name, Self::NAME_MIN_LENGTH);
        }
        require_text(&mut errors, "description", &self.description);

        let price = match self.price {
            None => {
                errors.add("price", FieldError::Required);
                None
            }
            Some(amount) if Price::new(amount) < Price::MIN => {
                errors.add("price", FieldError::Min { min: Price::MIN.amount().to_string() });
                None
            }
            Some(amount) => Some(Price::new(amount)),
        };
        let stock = count_in_range(&mut errors, "stock", self.stock, 0);

        (errors, price, stock)
    }
}

impl Draft for ProductDraft {
    type Output = ProductRequest;

    const FIELDS: &'static [&'static str] =
        &["name", "description", "category_id", "price", "stock", "image_url"];

    fn validate(&self) -> ValidationErrors {
        self.check().0
    }

    fn build(&self) -> Result<ProductRequest, ValidationErrors> {
        let (errors, price, stock) = self.check();
        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(ProductRequest {
                name: self.name.clone(),
                description: self.description.clone(),
                category_id: self.category_id,
                price,
                stock,
                image_url: optional_text(&self.image_url),
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Movement
// =============================================================================

/// Raw input of the movement form.
///
/// No stock-sufficiency check happens here: the server rejects an outbound
/// movement larger than the current stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub product_id: Option<ProductId>,
    pub kind: Option<MovementKind>,
    pub quantity: Option<i64>,
    pub description: String,
}

impl Default for MovementDraft {
    fn default() -> Self {
        Self {
            product_id: None,
            kind: Some(MovementKind::In),
            quantity: Some(1),
            description: String::new(),
        }
    }
}

impl Draft for MovementDraft {
    type Output = MovementRequest;

    const FIELDS: &'static [&'static str] = &["product_id", "type", "quantity", "description"];

    fn validate(&self) -> ValidationErrors {
        self.build().err().unwrap_or_default()
    }

    fn build(&self) -> Result<MovementRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.product_id.is_none() {
            errors.add("product_id", FieldError::Required);
        }
        if self.kind.is_none() {
            errors.add("type", FieldError::Required);
        }
        let quantity = count_in_range(&mut errors, "quantity", self.quantity, 1);

        match (self.product_id, self.kind, quantity) {
            (Some(product_id), Some(kind), Some(quantity)) if errors.is_empty() => {
                Ok(MovementRequest {
                    product_id,
                    kind,
                    quantity,
                    description: optional_text(&self.description),
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Raw input of the category form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    type Output = CategoryRequest;

    const FIELDS: &'static [&'static str] = &["name", "description"];

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", self.name.trim());
        errors
    }

    fn build(&self) -> Result<CategoryRequest, ValidationErrors> {
        self.validate().into_result()?;
        Ok(CategoryRequest {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

// =============================================================================
// Authentication
// =============================================================================

/// Raw input of the login form.
#[derive(Clone, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Draft for LoginDraft {
    type Output = LoginRequest;

    const FIELDS: &'static [&'static str] = &["email", "password"];

    fn validate(&self) -> ValidationErrors {
        self.build().err().unwrap_or_default()
    }

    fn build(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = email_field(&mut errors, "email", &self.email);
        require_text(&mut errors, "password", &self.password);

        match email {
            Some(email) if errors.is_empty() => Ok(LoginRequest {
                email,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw input of the registration form.
#[derive(Clone, Default)]
pub struct RegisterDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl RegisterDraft {
    /// Minimum username length.
    pub const USERNAME_MIN_LENGTH: usize = 3;
    /// Minimum password length.
    pub const PASSWORD_MIN_LENGTH: usize = 6;
}

impl fmt::Debug for RegisterDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

impl Draft for RegisterDraft {
    type Output = RegisterRequest;

    const FIELDS: &'static [&'static str] = &["username", "email", "password", "role"];

    fn validate(&self) -> ValidationErrors {
        self.build().err().unwrap_or_default()
    }

    fn build(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if require_text(&mut errors, "username", &self.username) {
            min_length(&mut errors, "username", &self.username, Self::USERNAME_MIN_LENGTH);
        }
        let email = email_field(&mut errors, "email", &self.email);
        if require_text(&mut errors, "password", &self.password) {
            min_length(&mut errors, "password", &self.password, Self::PASSWORD_MIN_LENGTH);
        }

        match email {
            Some(email) if errors.is_empty() => Ok(RegisterRequest {
                username: self.username.clone(),
                email,
                password: self.password.clone(),
                role: self.role,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_product() -> ProductDraft {
        ProductDraft {
            name: "Taladro".to_owned(),
            description: "Percutor 600W".to_owned(),
            category_id: Some(CategoryId::new(2)),
            price: Some(Decimal::new(4599, 2)),
            stock: Some(8),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_valid_product_builds_request() {
        let request = valid_product().build().unwrap();
        assert_eq!(request.price, Price::from_cents(4599));
        assert_eq!(request.stock, 8);
        assert_eq!(request.image_url, None);
    }

    #[test]
    fn test_default_product_draft_is_invalid() {
        let errors = ProductDraft::default().validate();
        assert_eq!(errors.field("name"), &[FieldError::Required]);
        assert_eq!(errors.field("description"), &[FieldError::Required]);
        assert!(errors.has("price"));
        assert!(!errors.has("stock"));
    }

    #[test]
    fn test_product_rules() {
        let draft = ProductDraft {
            name: "ab".to_owned(),
            price: Some(Decimal::new(1, 3)),
            stock: Some(-1),
            ..valid_product()
        };
        let errors = draft.validate();
        assert_eq!(errors.field("name"), &[FieldError::MinLength { min: 3 }]);
        assert!(matches!(errors.field("price"), [FieldError::Min { .. }]));
        assert!(matches!(errors.field("stock"), [FieldError::Min { .. }]));

        let cent = ProductDraft {
            price: Some(Decimal::new(1, 2)),
            stock: Some(0),
            ..valid_product()
        };
        assert!(cent.validate().is_empty());
    }

    #[test]
    fn test_product_draft_round_trips_existing_product() {
        let request = valid_product().build().unwrap();
        let product = Product {
            id: ProductId::new(1),
            name: request.name.clone(),
            description: request.description.clone(),
            category_id: request.category_id,
            category: None,
            price: request.price,
            stock: request.stock,
            image_url: Some("https://img.example/taladro.png".to_owned()),
            created_at: None,
            updated_at: None,
        };
        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.image_url, "https://img.example/taladro.png");
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_movement_defaults_need_only_a_product() {
        let mut draft = MovementDraft::default();
        assert_eq!(draft.validate().fields().collect::<Vec<_>>(), vec!["product_id"]);

        draft.product_id = Some(ProductId::new(4));
        let request = draft.build().unwrap();
        assert_eq!(request.kind, MovementKind::In);
        assert_eq!(request.quantity, 1);
    }

    #[test]
    fn test_movement_quantity_must_be_positive() {
        let draft = MovementDraft {
            product_id: Some(ProductId::new(4)),
            quantity: Some(0),
            ..MovementDraft::default()
        };
        assert!(matches!(draft.validate().field("quantity"), [FieldError::Min { .. }]));
    }

    #[test]
    fn test_category_name_required() {
        let draft = CategoryDraft {
            name: "  ".to_owned(),
            description: String::new(),
        };
        assert!(draft.build().is_err());
    }

    #[test]
    fn test_login_rules() {
        let draft = LoginDraft {
            email: "not-an-email".to_owned(),
            password: String::new(),
        };
        let errors = draft.validate();
        assert!(matches!(errors.field("email"), [FieldError::Email(_)]));
        assert_eq!(errors.field("password"), &[FieldError::Required]);
        assert!(!format!("{draft:?}").contains("password: \"\""));
    }

    #[test]
    fn test_register_rules() {
        let draft = RegisterDraft {
            username: "jo".to_owned(),
            email: "jo@example.com".to_owned(),
            password: "12345".to_owned(),
            role: None,
        };
        let errors = draft.validate();
        assert_eq!(errors.field("username"), &[FieldError::MinLength { min: 3 }]);
        assert_eq!(errors.field("password"), &[FieldError::MinLength { min: 6 }]);
        assert!(!errors.has("email"));
    }

    #[test]
    fn test_failed_submit_marks_all_fields_touched() {
        let mut form = FormState::new(ProductDraft::default());
        assert!(form.visible_errors().is_empty());

        form.touch("name");
        assert_eq!(form.visible_errors().fields().collect::<Vec<_>>(), vec!["name"]);

        assert!(form.submit().is_err());
        assert!(ProductDraft::FIELDS.iter().all(|f| form.is_touched(f)));
        assert_eq!(form.visible_errors(), form.draft.validate());
    }

    #[test]
    fn test_successful_submit_returns_payload() {
        let mut form = FormState::new(valid_product());
        assert!(form.is_valid());
        assert_eq!(form.submit().unwrap().name, "Taladro");
    }

    #[test]
    fn test_errors_display_lists_every_rule() {
        let text = ProductDraft::default().validate().to_string();
        assert!(text.contains("name is required"));
        assert!(text.contains("description is required"));
    }
}
