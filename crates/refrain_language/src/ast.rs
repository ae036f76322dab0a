//! The pattern expression tree.
//!
//! A [`Pattern`] is a tagged tree; the evaluator in `refrain_engine` is an
//! exhaustive match over its variants. Trees are immutable after parsing:
//! variable substitution (see [`crate::subst`]) builds fresh trees.

/// A node in the pattern expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Element presence: every group containing the element.
    Elem(String),
    /// Insertion events: groups where the element enters the sequence.
    InElem(String),
    /// Removal events: first groups after the element disappeared.
    OutElem(String),
    /// Matches of the child pinned to the first position of the window.
    First(Box<Pattern>),
    /// Matches of the child pinned to the last position of the window.
    Last(Box<Pattern>),
    /// Negation as a predicate: the full window when the child is empty.
    Not(Box<Pattern>),
    /// Conjunction of existence: all children must match somewhere.
    And(Vec<Pattern>),
    /// Union of witnesses.
    Or(Vec<Pattern>),
    /// Positional intersection.
    Intersect(Vec<Pattern>),
    /// Strict temporal order: left strictly before right.
    Seq(Box<Pattern>, Box<Pattern>),
    /// Loose temporal order: left at or before right.
    LooseSeq(Box<Pattern>, Box<Pattern>),
    /// Contiguous sub-sequence window.
    Slice {
        /// The expression checked inside each candidate window.
        body: Box<Pattern>,
        /// `{` boundary: the window's first group is excluded from the
        /// inner check.
        open_left: bool,
        /// `}` boundary: the window's last group is excluded from the
        /// inner check.
        open_right: bool,
    },
}

impl Pattern {
    /// Creates an element presence node.
    #[must_use]
    pub fn elem(name: impl Into<String>) -> Self {
        Self::Elem(name.into())
    }

    /// Creates an insertion event node (`In<name>`).
    #[must_use]
    pub fn insertion(name: impl Into<String>) -> Self {
        Self::InElem(name.into())
    }

    /// Creates a removal event node (`Out<name>`).
    #[must_use]
    pub fn removal(name: impl Into<String>) -> Self {
        Self::OutElem(name.into())
    }

    /// Pins the child to the first position (`^`).
    #[must_use]
    pub fn first(inner: Self) -> Self {
        Self::First(Box::new(inner))
    }

    /// Pins the child to the last position (`$`).
    #[must_use]
    pub fn last(inner: Self) -> Self {
        Self::Last(Box::new(inner))
    }

    /// Negates the child (`~`).
    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Orders two children strictly in time (`->`).
    #[must_use]
    pub fn seq(left: Self, right: Self) -> Self {
        Self::Seq(Box::new(left), Box::new(right))
    }

    /// Orders two children loosely in time (`=>`).
    #[must_use]
    pub fn loose_seq(left: Self, right: Self) -> Self {
        Self::LooseSeq(Box::new(left), Box::new(right))
    }

    /// Wraps a body in a slice window with the given boundary openness.
    #[must_use]
    pub fn slice(body: Self, open_left: bool, open_right: bool) -> Self {
        Self::Slice {
            body: Box::new(body),
            open_left,
            open_right,
        }
    }

    /// A human-readable name for this node variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Elem(_) => "element",
            Self::InElem(_) => "insertion",
            Self::OutElem(_) => "removal",
            Self::First(_) => "first",
            Self::Last(_) => "last",
            Self::Not(_) => "not",
            Self::And(_) => "and",
            Self::Or(_) => "or",
            Self::Intersect(_) => "intersect",
            Self::Seq(_, _) => "sequence",
            Self::LooseSeq(_, _) => "loose sequence",
            Self::Slice { .. } => "slice",
        }
    }
}

/// Writes `rules` joined by `sep` into `f`.
fn write_joined(
    f: &mut std::fmt::Formatter<'_>,
    rules: &[Pattern],
    sep: &str,
) -> std::fmt::Result {
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{rule}")?;
    }
    Ok(())
}

impl std::fmt::Display for Pattern {
    /// Renders the surface syntax of this pattern.
    ///
    /// Conjunctions print parenthesized (`(A B)`) except directly inside a
    /// slice, which prints its body bare (`[A B]`), matching how patterns
    /// are written.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elem(name) => write!(f, "{name}"),
            Self::InElem(name) => write!(f, "In{name}"),
            Self::OutElem(name) => write!(f, "Out{name}"),
            Self::First(inner) => write!(f, "^{inner}"),
            Self::Last(inner) => write!(f, "${inner}"),
            Self::Not(inner) => write!(f, "~{inner}"),
            Self::And(rules) => {
                write!(f, "(")?;
                write_joined(f, rules, " ")?;
                write!(f, ")")
            }
            Self::Or(rules) => write_joined(f, rules, " | "),
            Self::Intersect(rules) => write_joined(f, rules, " & "),
            Self::Seq(left, right) => write!(f, "{left} -> {right}"),
            Self::LooseSeq(left, right) => write!(f, "{left} => {right}"),
            Self::Slice {
                body,
                open_left,
                open_right,
            } => {
                write!(f, "{}", if *open_left { '{' } else { '[' })?;
                if let Self::And(rules) = body.as_ref() {
                    write_joined(f, rules, " ")?;
                } else {
                    write!(f, "{body}")?;
                }
                write!(f, "{}", if *open_right { '}' } else { ']' })
            }
        }
    }
}
