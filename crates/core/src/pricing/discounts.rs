use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::customer::Customer;
use crate::domain::identity::ItemId;
use crate::pricing::{floor_at_zero, Purchasable};

/// How the duration and module-count rules decide eligibility.
///
/// `Generic` reads whatever the wrapped value reports. `CartOnly` only qualifies when the
/// immediate wrapped value is a cart, so a discount stacked on another decorator or on a
/// bare entity never applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityMode {
    #[default]
    Generic,
    CartOnly,
}

impl FromStr for EligibilityMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "cart_only" | "cart-only" => Ok(Self::CartOnly),
            other => Err(ConfigError::Validation(format!(
                "unsupported eligibility mode `{other}` (expected generic|cart_only)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    pub special_amount: Decimal,
    pub special_min_duration_hours: Decimal,
    pub multi_module_amount: Decimal,
    pub multi_module_min_modules: u32,
    pub developing_country_student_amount: Decimal,
    pub eligibility: EligibilityMode,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            special_amount: Decimal::new(1200, 2),
            special_min_duration_hours: Decimal::new(50, 1),
            multi_module_amount: Decimal::new(1500, 2),
            multi_module_min_modules: 2,
            developing_country_student_amount: Decimal::new(1000, 2),
            eligibility: EligibilityMode::Generic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Special,
    MultiModule,
    DevelopingCountryStudent,
}

impl DiscountKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Special => "Special Discount",
            Self::MultiModule => "Multi-Module Discount",
            Self::DevelopingCountryStudent => "Developing Country Student Discount",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscountRule {
    Special { min_duration_hours: Decimal, amount: Decimal },
    MultiModule { min_modules: u32, amount: Decimal },
    DevelopingCountryStudent { customer: Customer, amount: Decimal },
}

impl DiscountRule {
    pub fn special(policy: &DiscountPolicy) -> Self {
        Self::Special {
            min_duration_hours: policy.special_min_duration_hours,
            amount: policy.special_amount,
        }
    }

    pub fn multi_module(policy: &DiscountPolicy) -> Self {
        Self::MultiModule {
            min_modules: policy.multi_module_min_modules,
            amount: policy.multi_module_amount,
        }
    }

    pub fn developing_country_student(customer: Customer, policy: &DiscountPolicy) -> Self {
        Self::DevelopingCountryStudent {
            customer,
            amount: policy.developing_country_student_amount,
        }
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            Self::Special { .. } => DiscountKind::Special,
            Self::MultiModule { .. } => DiscountKind::MultiModule,
            Self::DevelopingCountryStudent { .. } => DiscountKind::DevelopingCountryStudent,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Special { amount, .. }
            | Self::MultiModule { amount, .. }
            | Self::DevelopingCountryStudent { amount, .. } => *amount,
        }
    }

    /// Human-readable trigger, e.g. `duration >= 5.0 hours`.
    pub fn condition(&self) -> String {
        match self {
            Self::Special { min_duration_hours, .. } => {
                format!("duration >= {min_duration_hours} hours")
            }
            Self::MultiModule { min_modules, .. } => format!("{min_modules}+ modules"),
            Self::DevelopingCountryStudent { .. } => {
                "student from a developing country".to_string()
            }
        }
    }

    pub fn is_eligible<W>(&self, wrapped: &W, mode: EligibilityMode) -> bool
    where
        W: Purchasable + ?Sized,
    {
        match self {
            Self::Special { min_duration_hours, .. } => match mode {
                EligibilityMode::Generic => wrapped.duration() >= *min_duration_hours,
                EligibilityMode::CartOnly => wrapped
                    .as_cart()
                    .is_some_and(|cart| cart.duration() >= *min_duration_hours),
            },
            Self::MultiModule { min_modules, .. } => match mode {
                EligibilityMode::Generic => wrapped.module_count() >= *min_modules,
                EligibilityMode::CartOnly => {
                    wrapped.as_cart().is_some_and(|cart| cart.module_count() >= *min_modules)
                }
            },
            Self::DevelopingCountryStudent { customer, .. } => {
                customer.is_developing_country_student()
            }
        }
    }
}

/// Wraps one cart-like purchasable and subtracts a fixed amount when its rule holds.
///
/// The result is floored at zero at this layer, before any outer layer subtracts more.
#[derive(Clone, Debug)]
pub struct Discount<P> {
    id: ItemId,
    inner: P,
    rule: DiscountRule,
    mode: EligibilityMode,
}

impl<P: Purchasable> Discount<P> {
    pub fn new(inner: P, rule: DiscountRule, mode: EligibilityMode) -> Self {
        Self { id: ItemId::new(), inner, rule, mode }
    }

    pub fn special(inner: P, policy: &DiscountPolicy) -> Self {
        Self::new(inner, DiscountRule::special(policy), policy.eligibility)
    }

    pub fn multi_module(inner: P, policy: &DiscountPolicy) -> Self {
        Self::new(inner, DiscountRule::multi_module(policy), policy.eligibility)
    }

    pub fn developing_country_student(
        inner: P,
        customer: Customer,
        policy: &DiscountPolicy,
    ) -> Self {
        Self::new(
            inner,
            DiscountRule::developing_country_student(customer, policy),
            policy.eligibility,
        )
    }

    pub fn rule(&self) -> &DiscountRule {
        &self.rule
    }

    pub fn mode(&self) -> EligibilityMode {
        self.mode
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    pub fn is_eligible(&self) -> bool {
        self.rule.is_eligible(&self.inner, self.mode)
    }
}

impl<P: Purchasable> Purchasable for Discount<P> {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        let base_price = self.inner.price();
        if self.is_eligible() {
            return floor_at_zero(base_price - self.rule.amount());
        }
        base_price
    }

    fn duration(&self) -> Decimal {
        self.inner.duration()
    }

    fn module_count(&self) -> u32 {
        self.inner.module_count()
    }

    fn describe(&self, indent: &str) -> String {
        let mut out = self.inner.describe(indent);
        if self.is_eligible() {
            out.push_str(&format!(
                "{indent}{} Applied: -${:.2}\n",
                self.rule.kind().label(),
                self.rule.amount()
            ));
        }
        out
    }
}
