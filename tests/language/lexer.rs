//! Integration tests for the lexer
//!
//! Tests tokenization of pattern text.

use refrain_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .expect("lex failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// =============================================================================
// Basic Tokens
// =============================================================================

#[test]
fn tokenize_identifier() {
    assert_eq!(
        kinds("Fever"),
        vec![TokenKind::Ident("Fever".into()), TokenKind::Eof]
    );
}

#[test]
fn tokenize_prefixed_identifiers_stay_raw() {
    // The lexer returns the raw identifier; In/Out splitting is the
    // parser's job.
    assert_eq!(
        kinds("InA OutB"),
        vec![
            TokenKind::Ident("InA".into()),
            TokenKind::Ws,
            TokenKind::Ident("OutB".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn tokenize_full_operator_set() {
    assert_eq!(
        kinds("~^$A|B&C->D=>E"),
        vec![
            TokenKind::Tilde,
            TokenKind::Caret,
            TokenKind::Dollar,
            TokenKind::Ident("A".into()),
            TokenKind::Pipe,
            TokenKind::Ident("B".into()),
            TokenKind::Amp,
            TokenKind::Ident("C".into()),
            TokenKind::Arrow,
            TokenKind::Ident("D".into()),
            TokenKind::FatArrow,
            TokenKind::Ident("E".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn tokenize_slice_delimiters() {
    assert_eq!(
        kinds("[A}"),
        vec![
            TokenKind::LBracket,
            TokenKind::Ident("A".into()),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

// =============================================================================
// Whitespace
// =============================================================================

#[test]
fn tokenize_whitespace_is_one_token() {
    assert_eq!(
        kinds("A \t  B"),
        vec![
            TokenKind::Ident("A".into()),
            TokenKind::Ws,
            TokenKind::Ident("B".into()),
            TokenKind::Eof,
        ]
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn tokenize_unknown_character_fails() {
    assert!(Lexer::tokenize_all("A + B").is_err());
    assert!(Lexer::tokenize_all("A\nB").is_err());
    assert!(Lexer::tokenize_all("Ä").is_err());
}

#[test]
fn tokenize_half_arrows_fail() {
    assert!(Lexer::tokenize_all("A - B").is_err());
    assert!(Lexer::tokenize_all("A = B").is_err());
}
