use edulearn_core::{ApplicationError, Catalog, DomainError, Purchasable};

use crate::commands::CommandResult;

/// `module_number` is 1-based, as printed by `edulearn catalog`.
pub fn run(catalog: &Catalog, module_number: usize) -> CommandResult {
    let selected = module_number
        .checked_sub(1)
        .ok_or(DomainError::CatalogSelection { index: 0, len: catalog.len() })
        .and_then(|index| catalog.select(index));

    match selected {
        Ok(module) => CommandResult::rendered(module.describe("")),
        Err(error) => CommandResult::from_error("show", &ApplicationError::from(error)),
    }
}
