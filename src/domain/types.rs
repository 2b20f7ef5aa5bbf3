// ==========================================
// 超市销售数据看板 - 领域类型定义
// ==========================================
// 职责: 交易记录中的封闭枚举字段（客户类型/性别/产品线/支付方式）
// 红线: 源数据取值不在封闭集合内 → DQ ERROR，行被阻断
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 源数据取值归一化：去空白、转小写、去掉分隔符
///
/// "E-wallet" / "Ewallet" / "e wallet" → "ewallet"
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

// ==========================================
// 客户类型 (Customer Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Member, // 会员
    Normal, // 普通客户
}

impl CustomerType {
    pub const ALL: [CustomerType; 2] = [CustomerType::Member, CustomerType::Normal];

    /// 从源数据文本解析
    pub fn from_source(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "member" => Some(CustomerType::Member),
            "normal" => Some(CustomerType::Normal),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Member => write!(f, "Member"),
            CustomerType::Normal => write!(f, "Normal"),
        }
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn from_source(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "female" | "f" => Some(Gender::Female),
            "male" | "m" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

// ==========================================
// 产品线 (Product Line)
// ==========================================
// 封闭集合: 6 个类目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    #[serde(rename = "Electronic accessories")]
    ElectronicAccessories,
    #[serde(rename = "Fashion accessories")]
    FashionAccessories,
    #[serde(rename = "Food and beverages")]
    FoodAndBeverages,
    #[serde(rename = "Health and beauty")]
    HealthAndBeauty,
    #[serde(rename = "Home and lifestyle")]
    HomeAndLifestyle,
    #[serde(rename = "Sports and travel")]
    SportsAndTravel,
}

impl ProductLine {
    pub const ALL: [ProductLine; 6] = [
        ProductLine::ElectronicAccessories,
        ProductLine::FashionAccessories,
        ProductLine::FoodAndBeverages,
        ProductLine::HealthAndBeauty,
        ProductLine::HomeAndLifestyle,
        ProductLine::SportsAndTravel,
    ];

    /// 兼容 "Food and beverages" / "Food_and_beverages" / "FOOD AND BEVERAGES"
    pub fn from_source(value: &str) -> Option<Self> {
        let key = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|line| normalize_label(&line.to_string()) == key)
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProductLine::ElectronicAccessories => "Electronic accessories",
            ProductLine::FashionAccessories => "Fashion accessories",
            ProductLine::FoodAndBeverages => "Food and beverages",
            ProductLine::HealthAndBeauty => "Health and beauty",
            ProductLine::HomeAndLifestyle => "Home and lifestyle",
            ProductLine::SportsAndTravel => "Sports and travel",
        };
        write!(f, "{}", label)
    }
}

// ==========================================
// 支付方式 (Payment Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Ewallet,
    Cash,
    #[serde(rename = "Credit card")]
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Ewallet,
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
    ];

    pub fn from_source(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "ewallet" => Some(PaymentMethod::Ewallet),
            "cash" => Some(PaymentMethod::Cash),
            "creditcard" | "card" => Some(PaymentMethod::CreditCard),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Ewallet => write!(f, "Ewallet"),
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::CreditCard => write!(f, "Credit card"),
        }
    }
}
