//! Checks run on an [`EnumLibrary`] before any code is emitted.

use crate::codegen::GenerateOptions;
use crate::error::{EnumgenError, Result};
use crate::ident::{check_family_name, constant_name};
use crate::types::EnumLibrary;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Rejects libraries whose generated file would not compile or would not fit
/// the configured integer width.
pub fn validate(library: &EnumLibrary, options: &GenerateOptions) -> Result<()> {
    debug!("Validating {} families", library.len());

    // Every identifier emitted at file scope, mapped to what produced it.
    let mut idents: HashMap<String, String> = HashMap::new();
    let mut claim = |ident: String, origin: String| -> Result<()> {
        match idents.get(&ident) {
            Some(first) => Err(EnumgenError::DuplicateIdentifier {
                ident,
                first: first.clone(),
                second: origin,
            }),
            None => {
                idents.insert(ident, origin);
                Ok(())
            }
        }
    };

    for family in library.families() {
        let name = family.name();
        check_family_name(name)?;
        claim(name.to_string(), format!("family {name}"))?;

        for member in family.members() {
            if !options.repr.fits(member.value) {
                return Err(EnumgenError::OutOfRange {
                    family: name.to_string(),
                    label: member.label.clone(),
                    value: member.value.to_string(),
                    repr: options.repr,
                });
            }
            let constant = constant_name(name, &member.label)?;
            claim(constant, format!("{name}.{:?}", member.label))?;
        }

        for (first, second) in family.aliases() {
            if !options.allow_duplicate_values {
                return Err(EnumgenError::DuplicateValue {
                    family: name.to_string(),
                    value: first.value,
                    first: first.label.clone(),
                    second: second.label.clone(),
                });
            }
            warn!(
                "{} assigns 0x{:X} to both {:?} and {:?}; rendering prefers {:?}",
                name, first.value, first.label, second.label, second.label
            );
        }
    }

    Ok(())
}
