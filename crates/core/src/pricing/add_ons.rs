use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::identity::ItemId;
use crate::errors::DomainError;
use crate::pricing::Purchasable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    PracticeQuestionSet,
    LiveMentorSupport,
}

impl AddOnKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::PracticeQuestionSet => "Practice Question Set",
            Self::LiveMentorSupport => "Live Mentor Support",
        }
    }
}

/// Surcharges applied by each add-on kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnRates {
    pub practice_question_set: Decimal,
    pub live_mentor_support: Decimal,
}

impl Default for AddOnRates {
    fn default() -> Self {
        Self {
            practice_question_set: Decimal::new(1000, 2),
            live_mentor_support: Decimal::new(2000, 2),
        }
    }
}

impl AddOnRates {
    pub fn surcharge(&self, kind: AddOnKind) -> Decimal {
        match kind {
            AddOnKind::PracticeQuestionSet => self.practice_question_set,
            AddOnKind::LiveMentorSupport => self.live_mentor_support,
        }
    }
}

/// Wraps one purchasable and adds a fixed surcharge; duration and module count pass through.
#[derive(Clone, Debug)]
pub struct AddOn<P> {
    id: ItemId,
    inner: P,
    kind: AddOnKind,
    surcharge: Decimal,
}

impl<P: Purchasable> AddOn<P> {
    pub fn new(inner: P, kind: AddOnKind, surcharge: Decimal) -> Self {
        Self { id: ItemId::new(), inner, kind, surcharge }
    }

    pub fn practice_question_set(inner: P, surcharge: Decimal) -> Self {
        Self::new(inner, AddOnKind::PracticeQuestionSet, surcharge)
    }

    pub fn live_mentor_support(inner: P, surcharge: Decimal) -> Self {
        Self::new(inner, AddOnKind::LiveMentorSupport, surcharge)
    }

    pub fn kind(&self) -> AddOnKind {
        self.kind
    }

    pub fn surcharge(&self) -> Decimal {
        self.surcharge
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Purchasable> Purchasable for AddOn<P> {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.inner.price() + self.surcharge
    }

    fn duration(&self) -> Decimal {
        self.inner.duration()
    }

    fn module_count(&self) -> u32 {
        self.inner.module_count()
    }

    fn describe(&self, indent: &str) -> String {
        let mut out = self.inner.describe(indent);
        out.push_str(&format!(
            "{indent}Add-On: {}\n{indent}Price: ${:.2}\n",
            self.kind.label(),
            self.surcharge
        ));
        out
    }
}

/// Add-on combination picked for one catalog item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnSelection {
    #[default]
    None,
    PracticeOnly,
    MentorOnly,
    Both,
}

impl AddOnSelection {
    pub fn kinds(self) -> &'static [AddOnKind] {
        match self {
            Self::None => &[],
            Self::PracticeOnly => &[AddOnKind::PracticeQuestionSet],
            Self::MentorOnly => &[AddOnKind::LiveMentorSupport],
            Self::Both => &[AddOnKind::PracticeQuestionSet, AddOnKind::LiveMentorSupport],
        }
    }

    pub fn extra_cost(self, rates: &AddOnRates) -> Decimal {
        self.kinds().iter().map(|kind| rates.surcharge(*kind)).sum()
    }
}

impl fmt::Display for AddOnSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::None => "none",
            Self::PracticeOnly => "practice",
            Self::MentorOnly => "mentor",
            Self::Both => "both",
        };
        f.write_str(value)
    }
}

impl FromStr for AddOnSelection {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "practice" | "practice_only" => Ok(Self::PracticeOnly),
            "mentor" | "mentor_only" => Ok(Self::MentorOnly),
            "both" => Ok(Self::Both),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported add-on selection `{other}` (expected none|practice|mentor|both)"
            ))),
        }
    }
}

/// Wraps `item` in the add-ons named by `selection`, practice set innermost.
pub fn wrap_with_add_ons<P>(
    item: P,
    selection: AddOnSelection,
    rates: &AddOnRates,
) -> Box<dyn Purchasable>
where
    P: Purchasable + 'static,
{
    let base: Box<dyn Purchasable> = Box::new(item);
    selection.kinds().iter().fold(base, |wrapped, kind| -> Box<dyn Purchasable> {
        Box::new(AddOn::new(wrapped, *kind, rates.surcharge(*kind)))
    })
}
