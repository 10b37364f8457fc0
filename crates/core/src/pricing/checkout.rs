use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::customer::Customer;
use crate::errors::DomainError;
use crate::pricing::cart::Cart;
use crate::pricing::discounts::{Discount, DiscountKind, DiscountPolicy};
use crate::pricing::Purchasable;

/// `MultiModule(DevelopingCountryStudent(Special(cart)))`.
pub type CheckoutChain<'a> = Discount<Discount<Discount<&'a Cart>>>;

pub fn build_checkout_chain<'a>(
    cart: &'a Cart,
    customer: &Customer,
    policy: &DiscountPolicy,
) -> CheckoutChain<'a> {
    Discount::multi_module(
        Discount::developing_country_student(
            Discount::special(cart, policy),
            customer.clone(),
            policy,
        ),
        policy,
    )
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub label: String,
    pub condition: String,
    /// Configured amount of the rule.
    pub amount: Decimal,
    /// What the layer actually removed after the zero floor.
    pub effective_amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub customer: Customer,
    pub item_count: usize,
    pub subtotal: Decimal,
    pub duration: Decimal,
    pub module_count: u32,
    pub final_price: Decimal,
    pub savings: Decimal,
    pub applied_discounts: Vec<AppliedDiscount>,
    pub trace: Vec<CheckoutTraceStep>,
    pub priced_at: DateTime<Utc>,
}

impl CheckoutSummary {
    pub fn has_savings(&self) -> bool {
        self.savings > Decimal::ZERO
    }
}

pub trait CheckoutEngine {
    fn checkout(&self, cart: &Cart, customer: &Customer) -> CheckoutSummary;
}

#[derive(Clone, Debug, Default)]
pub struct StandardCheckoutEngine {
    policy: DiscountPolicy,
}

impl StandardCheckoutEngine {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }
}

impl CheckoutEngine for StandardCheckoutEngine {
    fn checkout(&self, cart: &Cart, customer: &Customer) -> CheckoutSummary {
        checkout_with_trace(cart, customer, &self.policy)
    }
}

pub fn checkout_with_trace(
    cart: &Cart,
    customer: &Customer,
    policy: &DiscountPolicy,
) -> CheckoutSummary {
    let chain = build_checkout_chain(cart, customer, policy);
    let subtotal = cart.price();
    let final_price = chain.price();

    let special = chain.inner().inner();
    let student = chain.inner();
    let layers = [
        (special.rule(), special.is_eligible(), subtotal, special.price()),
        (student.rule(), student.is_eligible(), special.price(), student.price()),
        (chain.rule(), chain.is_eligible(), student.price(), final_price),
    ];

    let mut trace = vec![CheckoutTraceStep {
        stage: "subtotal".to_string(),
        detail: format!("sum of {} cart item(s)", cart.len()),
        amount: subtotal,
    }];
    let mut applied_discounts = Vec::new();
    for (rule, eligible, before, after) in layers {
        let kind = rule.kind();
        let detail = if eligible {
            format!("applied ({}), -{:.2}", rule.condition(), rule.amount())
        } else {
            format!("not eligible ({})", rule.condition())
        };
        trace.push(CheckoutTraceStep { stage: stage_name(kind).to_string(), detail, amount: after });

        if eligible {
            applied_discounts.push(AppliedDiscount {
                kind,
                label: kind.label().to_string(),
                condition: rule.condition(),
                amount: rule.amount(),
                effective_amount: before - after,
            });
        }
    }

    let summary = CheckoutSummary {
        customer: customer.clone(),
        item_count: cart.len(),
        subtotal,
        duration: cart.duration(),
        module_count: cart.module_count(),
        final_price,
        savings: subtotal - final_price,
        applied_discounts,
        trace,
        priced_at: Utc::now(),
    };

    info!(
        event_name = "pricing.checkout.evaluated",
        item_count = summary.item_count,
        subtotal = %summary.subtotal,
        final_price = %summary.final_price,
        savings = %summary.savings,
        discounts_applied = summary.applied_discounts.len(),
        "checkout priced"
    );

    summary
}

/// Prices the cart and clears it, as a confirmed purchase does.
pub fn complete_checkout<E>(
    engine: &E,
    cart: &mut Cart,
    customer: &Customer,
) -> Result<CheckoutSummary, DomainError>
where
    E: CheckoutEngine + ?Sized,
{
    if cart.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    let summary = engine.checkout(cart, customer);
    cart.clear();
    info!(
        event_name = "pricing.checkout.confirmed",
        final_price = %summary.final_price,
        "checkout confirmed and cart cleared"
    );
    Ok(summary)
}

fn stage_name(kind: DiscountKind) -> &'static str {
    match kind {
        DiscountKind::Special => "special_discount",
        DiscountKind::MultiModule => "multi_module_discount",
        DiscountKind::DevelopingCountryStudent => "developing_country_student_discount",
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{
        build_checkout_chain, complete_checkout, CheckoutEngine, StandardCheckoutEngine,
    };
    use crate::domain::{course::Course, customer::Customer, lesson::Lesson, module::Module};
    use crate::errors::DomainError;
    use crate::pricing::add_ons::{wrap_with_add_ons, AddOnRates, AddOnSelection};
    use crate::pricing::cart::Cart;
    use crate::pricing::discounts::{DiscountKind, DiscountPolicy, EligibilityMode};
    use crate::pricing::Purchasable;

    fn module(title: &str, rate: i64, tenths_of_hours: i64) -> Module {
        Module::with_courses(
            title,
            vec![Course::with_lessons(
                format!("{title} course"),
                vec![Lesson::new(
                    format!("{title} lesson"),
                    Decimal::new(rate, 0),
                    Decimal::new(tenths_of_hours, 1),
                )],
            )],
        )
    }

    /// 150 total, 3 hours, 2 modules.
    fn short_two_module_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(Box::new(module("A", 50, 15)));
        cart.add_item(Box::new(module("B", 50, 15)));
        cart
    }

    #[test]
    fn full_chain_applies_student_and_multi_module_discounts() {
        let cart = short_two_module_cart();
        let student = Customer::new("Amina", true, true);
        let chain = build_checkout_chain(&cart, &student, &DiscountPolicy::default());

        assert_eq!(cart.price(), Decimal::new(150, 0));
        assert_eq!(cart.duration(), Decimal::new(3, 0));
        assert_eq!(chain.price(), Decimal::new(125, 0));
        assert_eq!(chain.duration(), cart.duration());
        assert_eq!(chain.module_count(), 2);
    }

    #[test]
    fn summary_reports_savings_and_applied_discounts() {
        let cart = short_two_module_cart();
        let engine = StandardCheckoutEngine::default();
        let summary = engine.checkout(&cart, &Customer::new("Amina", true, true));

        assert_eq!(summary.subtotal, Decimal::new(150, 0));
        assert_eq!(summary.final_price, Decimal::new(125, 0));
        assert_eq!(summary.savings, Decimal::new(25, 0));
        assert!(summary.has_savings());
        assert_eq!(summary.module_count, 2);
        let kinds = summary.applied_discounts.iter().map(|d| d.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![DiscountKind::DevelopingCountryStudent, DiscountKind::MultiModule]);
    }

    #[test]
    fn trace_follows_chain_order() {
        let cart = short_two_module_cart();
        let summary =
            StandardCheckoutEngine::default().checkout(&cart, &Customer::new("Amina", true, true));

        let stages = summary.trace.iter().map(|step| step.stage.as_str()).collect::<Vec<_>>();
        assert_eq!(
            stages,
            vec![
                "subtotal",
                "special_discount",
                "developing_country_student_discount",
                "multi_module_discount"
            ]
        );
        let amounts = summary.trace.iter().map(|step| step.amount).collect::<Vec<_>>();
        assert_eq!(
            amounts,
            vec![
                Decimal::new(150, 0),
                Decimal::new(150, 0),
                Decimal::new(140, 0),
                Decimal::new(125, 0)
            ]
        );
        assert!(summary.trace[1].detail.starts_with("not eligible"));
    }

    #[test]
    fn regular_customer_pays_subtotal_for_small_cart() {
        let mut cart = Cart::new();
        cart.add_item(Box::new(module("A", 10, 20)));
        let summary =
            StandardCheckoutEngine::default().checkout(&cart, &Customer::new("Ben", false, false));

        assert_eq!(summary.final_price, Decimal::new(20, 0));
        assert_eq!(summary.savings, Decimal::ZERO);
        assert!(!summary.has_savings());
        assert!(summary.applied_discounts.is_empty());
    }

    #[test]
    fn effective_amount_reflects_the_zero_floor() {
        let mut cart = Cart::new();
        cart.add_item(Box::new(Module::new("A")));
        cart.add_item(Box::new(Module::new("B")));
        let summary =
            StandardCheckoutEngine::default().checkout(&cart, &Customer::new("Ben", false, false));

        assert_eq!(summary.final_price, Decimal::ZERO);
        let multi = &summary.applied_discounts[0];
        assert_eq!(multi.kind, DiscountKind::MultiModule);
        assert_eq!(multi.amount, Decimal::new(15, 0));
        assert_eq!(multi.effective_amount, Decimal::ZERO);
    }

    #[test]
    fn add_ons_raise_subtotal_without_changing_eligibility() {
        let rates = AddOnRates::default();
        let mut cart = Cart::new();
        cart.add_item(wrap_with_add_ons(module("A", 50, 15), AddOnSelection::Both, &rates));
        cart.add_item(Box::new(module("B", 50, 15)));
        let summary =
            StandardCheckoutEngine::default().checkout(&cart, &Customer::new("Ben", false, false));

        assert_eq!(summary.subtotal, Decimal::new(180, 0));
        assert_eq!(summary.final_price, Decimal::new(165, 0));
    }

    #[test]
    fn cart_only_mode_drops_discounts_stacked_on_decorators() {
        let policy =
            DiscountPolicy { eligibility: EligibilityMode::CartOnly, ..DiscountPolicy::default() };
        let cart = short_two_module_cart();
        let summary = StandardCheckoutEngine::new(policy)
            .checkout(&cart, &Customer::new("Amina", true, true));

        assert_eq!(summary.final_price, Decimal::new(140, 0));
        let kinds = summary.applied_discounts.iter().map(|d| d.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![DiscountKind::DevelopingCountryStudent]);
    }

    #[test]
    fn complete_checkout_clears_the_cart() {
        let mut cart = short_two_module_cart();
        let engine = StandardCheckoutEngine::default();

        let summary = complete_checkout(&engine, &mut cart, &Customer::new("Ben", false, false))
            .expect("non-empty cart");
        assert_eq!(summary.final_price, Decimal::new(135, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn complete_checkout_rejects_empty_cart() {
        let mut cart = Cart::new();
        let error = complete_checkout(
            &StandardCheckoutEngine::default(),
            &mut cart,
            &Customer::new("Ben", false, false),
        )
        .expect_err("empty cart");
        assert_eq!(error, DomainError::EmptyCart);
    }

    #[test]
    fn summary_serializes_for_command_output() {
        let cart = short_two_module_cart();
        let summary =
            StandardCheckoutEngine::default().checkout(&cart, &Customer::new("Amina", true, true));
        let json = serde_json::to_value(&summary).expect("summary serializes");

        assert_eq!(json["customer"]["name"], "Amina");
        assert_eq!(json["applied_discounts"][1]["kind"], "multi_module");
    }
}
