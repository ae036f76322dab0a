//! Variable declarations, domains, and binding enumeration.
//!
//! A variable ranges over the corpus alphabet, optionally restricted by an
//! include or exclude list. Bindings are injective: two variables in the
//! same invocation never bind the same element. Enumeration order is not
//! part of the contract; callers should treat the result as a set.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use refrain_foundation::{Error, Result};
use serde::Serialize;

/// The domain rule of a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Every element in the corpus.
    Any,
    /// Only the listed elements.
    Include(BTreeSet<String>),
    /// Every corpus element except the listed ones.
    Exclude(BTreeSet<String>),
}

/// A declared variable with its domain rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDecl {
    /// The variable name as it appears in patterns.
    pub name: String,
    /// The domain rule.
    pub domain: Domain,
}

impl VarDecl {
    /// Parses a declaration of the shape `NAME`, `NAME~A,B,C` (exclude), or
    /// `NAME:A,B,C` (include).
    ///
    /// # Errors
    /// Returns an error when the name or the element list is empty.
    pub fn parse(text: &str) -> Result<Self> {
        let (name, domain) = if let Some((name, list)) = text.split_once(':') {
            (name, Domain::Include(parse_list(list, text)?))
        } else if let Some((name, list)) = text.split_once('~') {
            (name, Domain::Exclude(parse_list(list, text)?))
        } else {
            (text, Domain::Any)
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::parse(
                format!("variable declaration {text:?} has no name"),
                0,
            ));
        }
        Ok(Self {
            name: name.to_string(),
            domain,
        })
    }

    /// Computes this variable's universe from the corpus alphabet.
    #[must_use]
    pub fn universe(&self, alphabet: &BTreeSet<String>) -> BTreeSet<String> {
        match &self.domain {
            Domain::Any => alphabet.clone(),
            Domain::Include(list) => alphabet.intersection(list).cloned().collect(),
            Domain::Exclude(list) => alphabet.difference(list).cloned().collect(),
        }
    }
}

/// Parses a comma-separated element list.
fn parse_list(list: &str, decl: &str) -> Result<BTreeSet<String>> {
    let elements: BTreeSet<String> = list
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string)
        .collect();
    if elements.is_empty() {
        return Err(Error::parse(
            format!("variable declaration {decl:?} has an empty element list"),
            0,
        ));
    }
    Ok(elements)
}

/// One injective assignment of elements to variables, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// `(variable, element)` pairs in declaration order.
    pub pairs: Vec<(String, String)>,
}

impl Binding {
    /// Returns the substitution map for this binding.
    #[must_use]
    pub fn replaces(&self) -> BTreeMap<String, String> {
        self.pairs.iter().cloned().collect()
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (var, element)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{var} = {element}")?;
        }
        Ok(())
    }
}

/// Enumerates every injective binding of the declared variables over the
/// corpus alphabet.
///
/// # Errors
/// Returns an [`Error`] with kind `EmptyDomain` when any variable's
/// universe is empty, naming the variable.
pub fn enumerate_bindings(
    decls: &[VarDecl],
    alphabet: &BTreeSet<String>,
) -> Result<Vec<Binding>> {
    let mut universes = Vec::with_capacity(decls.len());
    for decl in decls {
        let universe = decl.universe(alphabet);
        if universe.is_empty() {
            return Err(Error::empty_domain(&decl.name));
        }
        universes.push((decl.name.clone(), universe));
    }

    let mut bindings = Vec::new();
    let mut chosen: Vec<(String, String)> = Vec::new();
    assign(&universes, &mut chosen, &mut bindings);
    tracing::debug!(
        variables = decls.len(),
        bindings = bindings.len(),
        "enumerated bindings"
    );
    Ok(bindings)
}

/// Depth-first enumeration skipping elements already taken.
fn assign(
    universes: &[(String, BTreeSet<String>)],
    chosen: &mut Vec<(String, String)>,
    bindings: &mut Vec<Binding>,
) {
    let Some((name, universe)) = universes.get(chosen.len()) else {
        if !chosen.is_empty() {
            bindings.push(Binding {
                pairs: chosen.clone(),
            });
        }
        return;
    };
    for element in universe {
        if chosen.iter().any(|(_, taken)| taken == element) {
            continue;
        }
        chosen.push((name.clone(), element.clone()));
        assign(universes, chosen, bindings);
        chosen.pop();
    }
}
