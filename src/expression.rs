// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for chmod-style level expressions.
//!
//! An expression is a comma-separated list of clauses like `u+rwx,g+r,o+x`. Each clause is
//! scanned from the back: action symbols (`r`, `w`, `x`) are collected first and then assigned to
//! every subject symbol (`u`, `g`, `o`) that comes before them. This also allows a compact
//! shorthand where several subjects share one clause, for example `ugrx` grants read and execute
//! to owner and group.
//!
//! Parsing is permissive: unknown symbols are skipped. Operators (`+`, `-`, `=`) only exist for
//! readability, they neither add nor remove anything. Use [`validate`] to reject expressions with
//! unknown symbols up-front.
use tracing::trace;

use crate::level::{GROUP_SHIFT, Level, LevelError, OTHER_SHIFT, OWNER_SHIFT};

/// Separator between clauses.
pub const CLAUSE_SEPARATOR: char = ',';

/// Every symbol accepted by [`validate`], apart from the clause separator.
pub const EXPRESSION_SYMBOLS: [char; 9] = ['r', 'w', 'x', 'u', 'g', 'o', '+', '-', '='];

impl Level {
    /// Compose a level from a chmod-style expression.
    ///
    /// ```
    /// use p2panda_acl::Level;
    ///
    /// let level = Level::from_expression("u+rwx,g+r,o+x");
    /// assert_eq!(level.to_string(), "rwxr----x");
    /// ```
    pub fn from_expression(expression: &str) -> Self {
        let mut owner = 0;
        let mut group = 0;
        let mut other = 0;

        for clause in expression.split(CLAUSE_SEPARATOR) {
            // Actions seen so far while scanning this clause backwards.
            let mut actions = 0;

            for symbol in clause.chars().rev() {
                match symbol {
                    'u' => owner |= actions,
                    'g' => group |= actions,
                    'o' => other |= actions,
                    'r' | 'w' | 'x' => actions |= Level::from_action(symbol).bits(),
                    '+' | '-' | '=' => (),
                    _ => trace!(%symbol, "ignore unknown symbol in level expression"),
                }
            }
        }

        Level::new((owner << OWNER_SHIFT) | (group << GROUP_SHIFT) | (other << OTHER_SHIFT))
    }

    /// Validate and compose a level from a chmod-style expression.
    ///
    /// Same as [`Level::from_expression`], but fails on symbols which are not part of the
    /// expression grammar.
    pub fn parse_expression(expression: &str) -> Result<Self, LevelError> {
        validate(expression)?;
        Ok(Self::from_expression(expression))
    }
}

/// Check that an expression only contains symbols of the expression grammar.
pub fn validate(expression: &str) -> Result<(), LevelError> {
    match expression
        .chars()
        .find(|symbol| *symbol != CLAUSE_SEPARATOR && !EXPRESSION_SYMBOLS.contains(symbol))
    {
        Some(symbol) => Err(LevelError::InvalidExpressionSymbol(symbol)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::level::{Level, LevelError};

    use super::validate;

    #[rstest]
    #[case("u+rwx,g+r,o+x", 0o741)]
    #[case("u=rwx,g=rx,o=", 0o750)]
    #[case("ug+rw", 0o660)]
    #[case("ugo+r", 0o444)]
    #[case("uwxgor", 0o744)]
    #[case("u+r,u+w,u+x", 0o700)]
    #[case("", 0o000)]
    #[case("rwx", 0o000)]
    #[case("u", 0o000)]
    fn compose_levels(#[case] expression: &str, #[case] expected: u16) {
        assert_eq!(Level::from_expression(expression), Level::new(expected));
    }

    #[test]
    fn actions_do_not_carry_over_clauses() {
        // "rwx" in the first clause belongs to nobody and is not applied to "g" in the next one.
        assert_eq!(Level::from_expression("rwx,g"), Level::NONE);
        assert_eq!(Level::from_expression("u+r,g"), Level::OWNER_READ);
    }

    #[test]
    fn removal_operator_is_inert() {
        // Accumulate-only: "-" does not remove previously granted actions.
        assert_eq!(Level::from_expression("u+rwx,u-w"), Level::new(0o700));
    }

    #[test]
    fn unknown_symbols_are_skipped() {
        assert_eq!(Level::from_expression("u+rqwx, g+r"), Level::new(0o740));
        assert_eq!(Level::from_expression("a+rwx"), Level::NONE);
    }

    #[test]
    fn strict_validation() {
        assert!(validate("u+rwx,g+r,o+x").is_ok());
        assert!(validate("uwxgor").is_ok());
        assert!(validate("").is_ok());
        assert_eq!(
            validate("u+rwx, g+r"),
            Err(LevelError::InvalidExpressionSymbol(' '))
        );
        assert_eq!(
            validate("a+rwx"),
            Err(LevelError::InvalidExpressionSymbol('a'))
        );

        assert_eq!(Level::parse_expression("g+rw"), Ok(Level::new(0o060)));
        assert!(Level::parse_expression("u+rwxs").is_err());
    }
}
