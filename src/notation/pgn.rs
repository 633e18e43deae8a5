//! PGN export and import.
//!
//! Export writes the Seven Tag Roster in its fixed order, then `SetUp`/`FEN`
//! when the game did not start from the standard position, then any extra
//! tags sorted by name. Import accepts comments (`{...}` and `;` to end of
//! line), variations, NAGs and move-number tokens, and replays every SAN
//! token through the engine so a PGN can never smuggle in an illegal move.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engine::{apply_san, parse_position, MoveDescriptor};
use crate::position::chess_rules::STARTING_POSITION_FEN;
use crate::position::chess_types::Color;
use crate::position::position::Position;

const PGN_DATE_FORMAT: &str = "%Y.%m.%d";
const UNKNOWN_DATE: &str = "????.??.??";
const MOVETEXT_LINE_WIDTH: usize = 80;
const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnMetadata {
    pub event: String,
    pub site: String,
    pub date: Option<NaiveDate>,
    pub round: String,
    pub white: String,
    pub black: String,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`; anything else is written as `*`.
    pub result: String,
    /// Start position when it is not the standard one.
    pub initial_fen: Option<String>,
    pub extra_tags: BTreeMap<String, String>,
}

impl Default for PgnMetadata {
    fn default() -> Self {
        Self {
            event: "Casual Game".to_owned(),
            site: "?".to_owned(),
            date: None,
            round: "-".to_owned(),
            white: "?".to_owned(),
            black: "?".to_owned(),
            result: "*".to_owned(),
            initial_fen: None,
            extra_tags: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub metadata: PgnMetadata,
    pub headers: BTreeMap<String, String>,
    pub initial_position: Position,
    pub moves: Vec<MoveDescriptor>,
    pub final_position: Position,
    pub result: String,
}

pub fn build_pgn(metadata: &PgnMetadata, moves: &[MoveDescriptor]) -> String {
    let result = normalize_result(&metadata.result);
    let date = metadata
        .date
        .map_or_else(|| UNKNOWN_DATE.to_owned(), |d| d.format(PGN_DATE_FORMAT).to_string());

    let mut out = String::new();
    let roster_values = [
        metadata.event.as_str(),
        metadata.site.as_str(),
        date.as_str(),
        metadata.round.as_str(),
        metadata.white.as_str(),
        metadata.black.as_str(),
        result,
    ];
    for (key, value) in SEVEN_TAG_ROSTER.iter().zip(roster_values) {
        push_tag(&mut out, key, value);
    }

    if let Some(fen) = metadata
        .initial_fen
        .as_deref()
        .filter(|fen| fen.trim() != STARTING_POSITION_FEN)
    {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", fen.trim());
    }

    for (key, value) in &metadata.extra_tags {
        if SEVEN_TAG_ROSTER.contains(&key.as_str()) || key == "SetUp" || key == "FEN" {
            continue;
        }
        if !is_tag_name(key) {
            warn!(tag = %key, "skipping PGN tag with an unwritable name");
            continue;
        }
        push_tag(&mut out, key, value);
    }

    out.push('\n');
    out.push_str(&wrap_movetext(&movetext_tokens(moves, result)));
    out.push('\n');
    out
}

/// Tag names are a single symbol token: letters, digits and `_`.
fn is_tag_name(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("[{key} \"{}\"]\n", escape_pgn_value(value)));
}

fn movetext_tokens(moves: &[MoveDescriptor], result: &str) -> Vec<String> {
    let mut tokens = Vec::<String>::with_capacity(moves.len() * 3 / 2 + 1);

    for (ply, descriptor) in moves.iter().enumerate() {
        match descriptor.color {
            Color::White => tokens.push(format!("{}.", descriptor.move_number)),
            Color::Black if ply == 0 => tokens.push(format!("{}...", descriptor.move_number)),
            Color::Black => {}
        }
        tokens.push(descriptor.san.clone());
    }

    tokens.push(result.to_owned());
    tokens
}

/// Joins tokens with spaces, breaking lines before they pass 80 columns.
/// A move number stays on the same line as the move it numbers.
fn wrap_movetext(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;

    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let mut chunk = token.clone();
        if token.ends_with('.') {
            if let Some(next) = iter.next() {
                chunk.push(' ');
                chunk.push_str(next);
            }
        }

        if line_len > 0 && line_len + 1 + chunk.len() > MOVETEXT_LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += chunk.len();
        out.push_str(&chunk);
    }

    out
}

/// Reads the first game of a PGN text.
pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();
    let mut in_movetext = false;

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') && !in_movetext {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else if trimmed.starts_with('[') {
            // Tag section of the next game.
            break;
        } else {
            in_movetext = true;
            movetext_lines.push(line);
        }
    }

    let initial_position = match headers.get("FEN") {
        Some(fen) if headers.get("SetUp").map(String::as_str) != Some("0") => parse_position(fen)
            .map_err(|err| ChessErrors::InvalidPgn(format!("FEN tag: {err}")))?,
        _ => Position::new_game(),
    };

    let movetext = strip_comments_and_variations(&movetext_lines.join("\n"));
    let mut position = initial_position.clone();
    let mut moves = Vec::<MoveDescriptor>::new();
    let mut result: Option<String> = None;

    for raw in movetext.split_whitespace() {
        let token = strip_move_number(raw);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            result = Some(token.to_owned());
            break;
        }

        let descriptor = apply_san(&position, token).map_err(|err| {
            ChessErrors::InvalidPgn(format!("move {} '{token}': {err}", moves.len() + 1))
        })?;
        position = descriptor.resulting_position.clone();
        moves.push(descriptor);
    }

    let result = result
        .or_else(|| headers.get("Result").cloned())
        .map_or_else(|| "*".to_owned(), |r| normalize_result(&r).to_owned());

    Ok(PgnGame {
        metadata: metadata_from_headers(&headers, &result),
        headers,
        initial_position,
        moves,
        final_position: position,
        result,
    })
}

fn metadata_from_headers(headers: &BTreeMap<String, String>, result: &str) -> PgnMetadata {
    let defaults = PgnMetadata::default();
    let tag = |key: &str, fallback: String| headers.get(key).cloned().unwrap_or(fallback);

    let extra_tags = headers
        .iter()
        .filter(|(key, _)| {
            !SEVEN_TAG_ROSTER.contains(&key.as_str()) && key.as_str() != "SetUp" && key.as_str() != "FEN"
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    PgnMetadata {
        event: tag("Event", defaults.event),
        site: tag("Site", defaults.site),
        date: headers
            .get("Date")
            .and_then(|d| NaiveDate::parse_from_str(d, PGN_DATE_FORMAT).ok()),
        round: tag("Round", defaults.round),
        white: tag("White", defaults.white),
        black: tag("Black", defaults.black),
        result: result.to_owned(),
        initial_fen: headers.get("FEN").cloned(),
        extra_tags,
    }
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessErrors::InvalidPgn(format!("tag pair {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.to_owned(), unescape_pgn_value(value)))
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_brace_comment = false;
    let mut in_line_comment = false;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        if in_brace_comment {
            if ch == '}' {
                in_brace_comment = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => in_brace_comment = true,
            ';' => in_line_comment = true,
            '(' => paren_depth += 1,
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(' ');
            }
            _ if paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and glued forms such as `12.e4` lose their number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || !token[digits..].starts_with('.') {
        return token;
    }
    token[digits..].trim_start_matches('.')
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape_pgn_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{apply_san, create_initial_position};

    fn play(start: &Position, sans: &[&str]) -> Vec<MoveDescriptor> {
        let mut position = start.clone();
        sans.iter()
            .map(|san| {
                let descriptor = apply_san(&position, san).expect("SAN should be legal");
                position = descriptor.resulting_position.clone();
                descriptor
            })
            .collect()
    }

    #[test]
    fn writes_roster_and_paired_movetext() {
        let moves = play(&create_initial_position(), &["f3", "e5", "g4", "Qh4#"]);
        let metadata = PgnMetadata {
            date: NaiveDate::from_ymd_opt(2024, 3, 9),
            white: "Alice".to_owned(),
            black: "Bob \"the Builder\"".to_owned(),
            result: "0-1".to_owned(),
            ..PgnMetadata::default()
        };

        let pgn = build_pgn(&metadata, &moves);
        let expected = "[Event \"Casual Game\"]\n\
                        [Site \"?\"]\n\
                        [Date \"2024.03.09\"]\n\
                        [Round \"-\"]\n\
                        [White \"Alice\"]\n\
                        [Black \"Bob \\\"the Builder\\\"\"]\n\
                        [Result \"0-1\"]\n\
                        \n\
                        1. f3 e5 2. g4 Qh4# 0-1\n";
        assert_eq!(pgn, expected);
    }

    #[test]
    fn unknown_date_and_unfinished_result() {
        let pgn = build_pgn(&PgnMetadata::default(), &[]);
        assert!(pgn.contains("[Date \"????.??.??\"]"));
        assert!(pgn.ends_with("\n\n*\n"));
    }

    #[test]
    fn black_to_move_start_uses_ellipsis_and_setup_tags() {
        let fen = "4k3/8/8/8/8/8/4p3/K7 b - - 0 30";
        let start = Position::from_fen(fen).expect("FEN should parse");
        let moves = play(&start, &["e1=Q+", "Ka2"]);
        let metadata = PgnMetadata {
            initial_fen: Some(fen.to_owned()),
            ..PgnMetadata::default()
        };

        let pgn = build_pgn(&metadata, &moves);
        assert!(pgn.contains("[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/4p3/K7 b - - 0 30\"]\n"));
        assert!(pgn.contains("30... e1=Q+ 31. Ka2 *"));

        let parsed = read_pgn(&pgn).expect("own output should parse");
        assert_eq!(parsed.initial_position, start);
        assert_eq!(parsed.moves, moves);
    }

    #[test]
    fn long_games_wrap_at_eighty_columns() {
        let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
        let sans: Vec<&str> = shuffle.iter().copied().cycle().take(60).collect();
        let moves = play(&create_initial_position(), &sans);
        let pgn = build_pgn(&PgnMetadata::default(), &moves);

        let movetext = pgn.split("\n\n").nth(1).expect("movetext section");
        assert!(movetext.lines().count() > 1);
        assert!(movetext.lines().all(|line| line.len() <= MOVETEXT_LINE_WIDTH));
        assert!(movetext.lines().all(|line| !line.ends_with('.')));
    }

    #[test]
    fn reads_comments_variations_and_nags() {
        let pgn = "[Event \"Club night\"]\n\
                   [Date \"2023.11.05\"]\n\
                   [Result \"1-0\"]\n\
                   [Opening \"Scholar's mate\"]\n\
                   \n\
                   1.e4 {king pawn} e5 2. Bc4 $1 Nc6 (2... Nf6 3. d3) 3. Qh5 ; threatening f7\n\
                   3... Nf6?? 4. Qxf7# 1-0\n";

        let game = read_pgn(pgn).expect("PGN should parse");
        let sans: Vec<&str> = game.moves.iter().map(|m| m.san.as_str()).collect();
        assert_eq!(sans, ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]);
        assert_eq!(game.result, "1-0");
        assert_eq!(game.metadata.event, "Club night");
        assert_eq!(game.metadata.date, NaiveDate::from_ymd_opt(2023, 11, 5));
        assert_eq!(
            game.metadata.extra_tags.get("Opening").map(String::as_str),
            Some("Scholar's mate")
        );
        assert!(game.moves.last().is_some_and(|m| m.is_checkmate));
    }

    #[test]
    fn rejects_illegal_moves_and_broken_tags() {
        assert!(matches!(
            read_pgn("1. e4 e5 2. Ke3 *"),
            Err(ChessErrors::InvalidPgn(_))
        ));
        assert!(matches!(
            read_pgn("[Event \"unterminated]\n\n1. e4 *"),
            Err(ChessErrors::InvalidPgn(_))
        ));
    }

    #[test]
    fn extra_tags_with_unwritable_names_are_skipped() {
        let mut metadata = PgnMetadata::default();
        for key in ["Time Control", "Bad\"Key", "", "Annotator", "White_Elo"] {
            metadata.extra_tags.insert(key.to_owned(), "x".to_owned());
        }

        let pgn = build_pgn(&metadata, &[]);
        assert!(pgn.contains("[Annotator \"x\"]\n"));
        assert!(pgn.contains("[White_Elo \"x\"]\n"));
        assert!(!pgn.contains("Time Control"));
        assert!(!pgn.contains("Bad"));

        let game = read_pgn(&pgn).expect("written tags should read back");
        let keys: Vec<&str> = game.metadata.extra_tags.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Annotator", "White_Elo"]);
    }

    #[test]
    fn round_trip_preserves_moves_and_metadata() {
        let moves = play(
            &create_initial_position(),
            &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6"],
        );
        let mut metadata = PgnMetadata {
            event: "Rated blitz".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 1, 31),
            ..PgnMetadata::default()
        };
        metadata.extra_tags.insert("ECO".to_owned(), "B90".to_owned());

        let game = read_pgn(&build_pgn(&metadata, &moves)).expect("round trip");
        assert_eq!(game.moves, moves);
        assert_eq!(game.metadata, metadata);
        assert_eq!(
            game.final_position,
            moves.last().expect("moves").resulting_position
        );
    }
}
