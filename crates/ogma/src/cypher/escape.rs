// Dweve Ogma - Object Graph Mapping for Cypher Stores
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Identifier quoting for Cypher statement text.
//!
//! Labels, relationship types, property keys, and index names cannot be
//! bound as parameters; the statement builders interpolate them into query
//! text directly. This module is the single trusted boundary responsible
//! for quoting those identifiers, so every caller-supplied identifier must
//! pass through here before reaching statement text.
//!
//! Quoting applies three layers:
//! 1. NFC normalization, so visually identical identifiers share one byte
//!    representation.
//! 2. Filtering of control characters, zero-width characters, and
//!    bidirectional formatting marks.
//! 3. Backtick quoting (with embedded backticks doubled) for anything that
//!    is not a plain identifier, including Cypher reserved words.

use unicode_normalization::UnicodeNormalization;

/// Check if a string is a plain Cypher identifier: a letter or underscore
/// followed by letters, digits, and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Characters that survive normalization but must never reach statement
/// text: control codes, zero-width characters, and bidi formatting marks.
fn is_dangerous(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'..='\u{200D}' // zero-width space / non-joiner / joiner
            | '\u{FEFF}' // zero-width no-break space
            | '\u{202A}'..='\u{202E}' // bidi embedding and overrides
            | '\u{2066}'..='\u{2069}' // bidi isolates
            | '\u{00AD}' // soft hyphen
            | '\u{061C}' // Arabic letter mark
            | '\u{180E}' // Mongolian vowel separator
        )
}

/// Normalize and strip an identifier before quoting.
fn sanitize(s: &str) -> String {
    s.nfc().filter(|c| !is_dangerous(*c)).collect()
}

/// Escape an identifier for direct interpolation into statement text.
///
/// Plain identifiers that are not reserved words pass through bare;
/// everything else is backtick-quoted with embedded backticks doubled.
///
/// # Examples
///
/// ```
/// # use ogma::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("has space"), "`has space`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    let sanitized = sanitize(s);
    if is_valid_identifier(&sanitized) && !is_reserved_word(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a label name. Same rules as identifiers; the caller composes the
/// `:` separators.
pub fn escape_label(s: &str) -> String {
    escape_identifier(s)
}

/// Escape a relationship type name. Same rules as identifiers; the caller
/// composes the pattern syntax around it.
pub fn escape_relationship_type(s: &str) -> String {
    escape_identifier(s)
}

/// Check if a string is a Cypher reserved word (case-insensitive).
fn is_reserved_word(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DO"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FILTER"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NODE"
            | "NONE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REDUCE"
            | "RELATIONSHIP"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SINGLE"
            | "SKIP"
            | "SOME"
            | "START"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "USING"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}
