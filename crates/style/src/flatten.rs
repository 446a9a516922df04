//! Rule Flattening
//!
//! Turns an ordered list of declarations into the final property map:
//! last declaration wins, `var(--name)` references are substituted and the
//! `padding` / `margin` shorthands are split into their four sides.

use inapp_css::Declaration;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Resolved property name to value map
pub type FlatRules = FxHashMap<String, String>;

/// Box shorthands expanded into `<name>-<side>` properties
const BOX_SHORTHANDS: [&str; 2] = ["padding", "margin"];

/// Side suffixes, in shorthand order
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Flatten declarations, in cascade order, into a property map
pub fn flatten<'a, I>(declarations: I) -> FlatRules
where
    I: IntoIterator<Item = &'a Declaration>,
{
    let mut variables: FxHashMap<&str, &str> = FxHashMap::default();
    let mut rules = FlatRules::default();

    for declaration in declarations {
        if declaration.is_variable() {
            if declaration.name.len() > 2 {
                variables.insert(&declaration.name, &declaration.value);
            }
        } else {
            rules.insert(declaration.name.clone(), declaration.value.clone());
        }
    }

    resolve_variables(&mut rules, &variables);

    for shorthand in BOX_SHORTHANDS {
        expand_box_shorthand(&mut rules, shorthand);
    }

    rules
}

/// Substitute `var(--name)` values; unresolvable references drop the rule
fn resolve_variables(rules: &mut FlatRules, variables: &FxHashMap<&str, &str>) {
    rules.retain(|name, value| {
        let Some(reference) = var_reference(value) else {
            return true;
        };
        if reference.is_empty() {
            return true;
        }

        match variables.get(reference.to_lowercase().as_str()) {
            Some(resolved) if !resolved.is_empty() => {
                *value = (*resolved).to_string();
                true
            }
            _ => {
                log::debug!("Dropping '{}': variable {} is not defined", name, reference);
                false
            }
        }
    });
}

/// The name inside `var(...)`, if the value is a variable reference
fn var_reference(value: &str) -> Option<&str> {
    value.strip_prefix("var(")?.strip_suffix(')')
}

/// Expand a 1 or 4 value shorthand into its sides
///
/// Sides already set explicitly are left alone. The shorthand itself is
/// removed even when its value count is invalid.
fn expand_box_shorthand(rules: &mut FlatRules, shorthand: &str) {
    let Some(value) = rules.get(shorthand).filter(|v| !v.is_empty()).cloned() else {
        return;
    };

    let parts: SmallVec<[&str; 4]> = value.split_whitespace().collect();
    let sides: Option<[&str; 4]> = match parts.as_slice() {
        [all] => Some([*all; 4]),
        [top, right, bottom, left] => Some([*top, *right, *bottom, *left]),
        _ => None,
    };

    match sides {
        Some(sides) => {
            let expanded: SmallVec<[(String, String); 4]> = SIDES
                .iter()
                .zip(sides)
                .map(|(side, part)| (format!("{}-{}", shorthand, side), part.to_string()))
                .collect();
            for (name, part) in expanded {
                rules.entry(name).or_insert(part);
            }
        }
        None => log::debug!("Ignoring '{}: {}': expected 1 or 4 values", shorthand, value),
    }

    rules.remove(shorthand);
}
