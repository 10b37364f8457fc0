use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub is_student: bool,
    pub is_from_developing_country: bool,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        is_student: bool,
        is_from_developing_country: bool,
    ) -> Self {
        Self { name: name.into(), is_student, is_from_developing_country }
    }

    pub fn is_developing_country_student(&self) -> bool {
        self.is_student && self.is_from_developing_country
    }
}
