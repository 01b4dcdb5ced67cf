use serde::{Deserialize, Serialize};
use std::error::Error;
use strum_macros::{Display as EnumDisplay, EnumIter};

pub type GenericError = Box<dyn Error + Send + Sync>;

pub const FEATURE_COUNT: usize = 10;

/// Column order the scaler and classifier were fitted on. Feature vectors are
/// always assembled in this order, regardless of how the form lays out its
/// widgets.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "product_category",
    "price",
    "delivery_days",
    "customer_tier",
    "is_cod",
    "product_rating",
    "customer_location",
    "return_reason",
    "product_weight_grams",
    "days_to_return",
];

/// Inclusive range and initial value of a numeric form field. The same
/// bounds drive the rendered widget attributes and server-side validation.
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub const PRICE_BOUNDS: FieldBounds = FieldBounds {
    min: 50.0,
    max: 10_000.0,
    default: 499.0,
};

pub const DELIVERY_DAYS_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 10.0,
    default: 3.0,
};

pub const PRODUCT_RATING_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 5.0,
    default: 4.0,
};

pub const PRODUCT_WEIGHT_BOUNDS: FieldBounds = FieldBounds {
    min: 100.0,
    max: 5_000.0,
    default: 1_200.0,
};

pub const DAYS_TO_RETURN_BOUNDS: FieldBounds = FieldBounds {
    min: 0.0,
    max: 30.0,
    default: 0.0,
};

// Categorical fields carry the integer codes the model was trained on. The
// Display labels double as the option texts on the form.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, EnumIter)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Home,
    Books,
    Beauty,
}

impl ProductCategory {
    pub fn code(&self) -> i64 {
        match self {
            Self::Electronics => 0,
            Self::Clothing => 1,
            Self::Home => 2,
            Self::Books => 3,
            Self::Beauty => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, EnumIter)]
pub enum CustomerTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CustomerTier {
    pub fn code(&self) -> i64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 1,
            Self::Gold => 2,
            Self::Platinum => 3,
        }
    }
}

/// Whether the order was paid cash on delivery. Kept as its own enum so the
/// form can offer the original Yes/No choice instead of a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, EnumIter)]
pub enum CodChoice {
    Yes,
    No,
}

impl CodChoice {
    pub fn code(&self) -> i64 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, EnumIter)]
pub enum CustomerLocation {
    North,
    South,
    East,
    West,
    Central,
}

impl CustomerLocation {
    pub fn code(&self) -> i64 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
            Self::Central => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay, EnumIter)]
pub enum ReturnReason {
    None,
    Defective,
    #[serde(rename = "Wrong Item")]
    #[strum(to_string = "Wrong Item")]
    WrongItem,
    #[serde(rename = "Changed Mind")]
    #[strum(to_string = "Changed Mind")]
    ChangedMind,
    #[serde(rename = "Late Delivery")]
    #[strum(to_string = "Late Delivery")]
    LateDelivery,
    Other,
}

impl ReturnReason {
    pub fn code(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Defective => 1,
            Self::WrongItem => 2,
            Self::ChangedMind => 3,
            Self::LateDelivery => 4,
            Self::Other => 5,
        }
    }
}

/// One order as submitted from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub product_category: ProductCategory,
    pub price: f64,
    pub delivery_days: i64,
    pub customer_tier: CustomerTier,
    pub is_cod: CodChoice,
    pub product_rating: f64,
    pub customer_location: CustomerLocation,
    pub return_reason: ReturnReason,
    pub product_weight_grams: i64,
    pub days_to_return: i64,
}

impl OrderDetails {
    /// Encode the order into the fixed training column order.
    pub fn to_feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.product_category.code() as f64,
            self.price,
            self.delivery_days as f64,
            self.customer_tier.code() as f64,
            self.is_cod.code() as f64,
            self.product_rating,
            self.customer_location.code() as f64,
            self.return_reason.code() as f64,
            self.product_weight_grams as f64,
            self.days_to_return as f64,
        ]
    }
}

impl Default for OrderDetails {
    /// The form's initial state: first option of every select, default value
    /// of every numeric widget.
    fn default() -> Self {
        Self {
            product_category: ProductCategory::Electronics,
            price: PRICE_BOUNDS.default,
            delivery_days: DELIVERY_DAYS_BOUNDS.default as i64,
            customer_tier: CustomerTier::Bronze,
            is_cod: CodChoice::Yes,
            product_rating: PRODUCT_RATING_BOUNDS.default,
            customer_location: CustomerLocation::North,
            return_reason: ReturnReason::None,
            product_weight_grams: PRODUCT_WEIGHT_BOUNDS.default as i64,
            days_to_return: DAYS_TO_RETURN_BOUNDS.default as i64,
        }
    }
}

/// The classifier's verdict. Code 1 means the product is predicted to come
/// back, any other non-zero code is treated the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDisplay)]
pub enum Label {
    Return,
    #[serde(rename = "Not Return")]
    #[strum(to_string = "Not Return")]
    NotReturn,
}

impl Label {
    pub fn from_code(code: i64) -> Self {
        if code == 0 { Self::NotReturn } else { Self::Return }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Return => 1,
            Self::NotReturn => 0,
        }
    }
}
