/**
 * A recursive-descent parser turning a template into its syntax tree.
 */

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::Arc;
use rand::Rng;
use tracing::trace;
use crate::ast::{Node, Quantity};
use crate::cursor::Cursor;
use crate::error::{SyntaxError, SyntaxErrorKind, Result};
use crate::rnd::{rand_inclusive, draw_count};

/*
 * Reference grammar for the parser:
 *
 * sequence    ::= element*
 *               ;
 *
 * element     ::=
 *               | element '|' element
 *               | '(' sequence ')' quantifier?
 *               | '[' '^'? class_item* ']' class_quant?
 *               | literal
 *               ;
 *
 * literal     ::= (NON_META_CHAR modifier?)+
 *               ;
 *
 * class_item  ::=
 *               | NON_META_CHAR '-' NON_META_CHAR
 *               | NON_META_CHAR
 *               ;
 *
 * class_quant ::= quantifier | modifier
 *               ;
 *
 * quantifier  ::= '{' DIGITS ([,-] DIGITS)* '}'
 *               ;
 *
 * modifier    ::= '?' | '*' | '+'
 *               ;
 *
 * There is no escaping, meta characters can never appear literally.
 */

/// Characters with a meaning in the template grammar
pub const META_CHARS: &str = "[]{}()|";

/// The widest span a character range may cover
pub const MAX_RANGE_SPAN: u32 = 10_000;

/// The largest count a quantifier may ask for
pub const MAX_REPEAT: usize = 10_000;

pub fn is_meta_char(c: char) -> bool {
    META_CHARS.contains(c)
}

/// The alphabet negated classes draw from: digits, ASCII letters, whitespace
/// and punctuation.
pub fn allowed_chars() -> BTreeSet<char> {
    ('\0'..='\x7f')
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_punctuation() || " \t\n\r\x0b\x0c".contains(*c))
        .collect()
}

/**
 * Actual parsing.
 */

/// Compiles a template. Randomized decisions the grammar makes at compile
/// time (literal modifiers, open class bounds, group repetition) are drawn
/// from `rng`.
pub fn parse<R>(source: &str, rng: &mut R) -> Result<Node> where R : Rng + ?Sized {
    let mut cur = Cursor::new(source);
    parse_sequence(&mut cur, rng, 0)
}

fn error<T>(cur: &Cursor, kind: SyntaxErrorKind) -> Result<T> {
    Err(SyntaxError::new(kind, cur.offset()))
}

/// Expands an inclusive range between two characters, in either direction.
pub fn character_range(from: char, to: char) -> std::result::Result<RangeInclusive<char>, SyntaxErrorKind> {
    let (from, to) = if from < to { (from, to) } else { (to, from) };
    if (to as u32) - (from as u32) > MAX_RANGE_SPAN {
        return Err(SyntaxErrorKind::RangeTooLarge{ from, to });
    }
    Ok(from..=to)
}

/// Expects the cursor on '{', leaves it on '}'.
fn parse_quantifier(cur: &mut Cursor) -> Result<Quantity> {
    debug_assert_eq!(cur.current(), Some('{'));

    let mut min = None;
    let mut digits = 0usize;
    loop {
        match cur.advance() {
            None => return error(cur, SyntaxErrorKind::UnterminatedQuantifier),

            Some(',') | Some('-') => {
                min = Some(digits);
                digits = 0;
            },

            Some('}') => {
                // An open upper bound like {3,} is not allowed
                if let Some(',') | Some('-') = cur.last() {
                    return error(cur, SyntaxErrorKind::OpenQuantifierRange);
                }
                break;
            },

            Some(c) => match c.to_digit(10) {
                Some(d) => {
                    digits = match digits.checked_mul(10).and_then(|x| x.checked_add(d as usize)) {
                        Some(x) => x,
                        None => return error(cur, SyntaxErrorKind::QuantifierOverflow),
                    };
                },
                None => return error(cur, SyntaxErrorKind::NonDigitInCount(c)),
            },
        }
    }

    if digits > MAX_REPEAT {
        return error(cur, SyntaxErrorKind::RepeatTooLarge(digits));
    }

    match min {
        None => Ok(Quantity::Exactly(digits)),
        Some(min) if min > digits =>
            error(cur, SyntaxErrorKind::InvertedQuantifier{ min, max: digits }),
        Some(min) => Ok(Quantity::Between(min, digits)),
    }
}

/// The range a postfix '?', '*' or '+' stands for. The open bounds of '*'
/// and '+' are capped by a draw up to the template length.
fn postfix_quantity<R>(rng: &mut R, modifier: char, pattern_len: usize) -> Option<Quantity>
    where R : Rng + ?Sized {

    match modifier {
        '?' => Some(Quantity::Between(0, 1)),
        '*' => Some(Quantity::Between(0, rand_inclusive(rng, 0, pattern_len))),
        '+' => Some(Quantity::Between(1, rand_inclusive(rng, 1, pattern_len.max(1)))),
        _ => None,
    }
}

/// Expects the cursor on the first character of the run. Modifiers bind to
/// the single character before them and are resolved right here, so the
/// resulting literal is fixed.
fn parse_literal<R>(cur: &mut Cursor, rng: &mut R) -> Node where R : Rng + ?Sized {
    let pattern_len = cur.len();
    let mut text = String::new();

    let mut c = cur.current();
    while let Some(ch) = c {
        if is_meta_char(ch) {
            break;
        }

        match cur.lookahead().and_then(|m| postfix_quantity(rng, m, pattern_len)) {
            Some(quantity) => {
                let repeat = draw_count(rng, quantity);
                text.extend(std::iter::repeat(ch).take(repeat));
                // Step onto the modifier
                cur.advance();
            },
            None => text.push(ch),
        }

        if cur.lookahead().map_or(false, is_meta_char) {
            break;
        }
        c = cur.advance();
    }

    Node::Literal(text)
}

/// Expects the cursor on '[', leaves it on the last character of the class
/// and its quantifier.
fn parse_character_set<R>(cur: &mut Cursor, rng: &mut R) -> Result<Node> where R : Rng + ?Sized {
    debug_assert_eq!(cur.current(), Some('['));

    // The caret itself is collected as a member, so negation drops it as well
    let negate = cur.lookahead() == Some('^');
    let mut chars = Vec::new();

    loop {
        let c = match cur.advance() {
            Some(c) => c,
            None => return error(cur, SyntaxErrorKind::UnterminatedClass),
        };

        // Closing wins over a following hyphen, so `[ab]-x` ends the class
        if c == ']' {
            break;
        }
        if is_meta_char(c) {
            return error(cur, SyntaxErrorKind::UnescapedInClass(c));
        }

        if cur.lookahead() == Some('-') {
            // Skip the hyphen
            cur.advance();
            let to = match cur.advance() {
                Some(to) if !is_meta_char(to) => to,
                _ => return error(cur, SyntaxErrorKind::UnterminatedRange),
            };
            let range = character_range(c, to).map_err(|kind| SyntaxError::new(kind, cur.offset()))?;
            chars.extend(range);
        }
        else {
            chars.push(c);
        }
    }

    let quantity = match cur.lookahead() {
        Some('{') => {
            cur.advance();
            parse_quantifier(cur)?
        },
        Some(m) => match postfix_quantity(rng, m, cur.len()) {
            Some(quantity) => {
                cur.advance();
                quantity
            },
            None => Quantity::default(),
        },
        None => Quantity::default(),
    };

    if negate {
        let excluded: BTreeSet<char> = chars.into_iter().collect();
        chars = allowed_chars().difference(&excluded).copied().collect();
    }
    if chars.is_empty() {
        return error(cur, SyntaxErrorKind::EmptyClass);
    }

    Ok(Node::CharacterSet{ chars, quantity })
}

/// Parses elements until the end of input or, for `level > 0`, the ')'
/// closing this group.
fn parse_sequence<R>(cur: &mut Cursor, rng: &mut R, level: usize) -> Result<Node> where R : Rng + ?Sized {
    let mut seq: Vec<Arc<Node>> = Vec::new();
    let mut operator: Option<char> = None;
    let mut left_operand: Option<Arc<Node>> = None;
    let mut closed = false;

    while let Some(c) = cur.advance() {
        let appended = match c {
            '[' => {
                seq.push(Arc::new(parse_character_set(cur, rng)?));
                true
            },

            '(' => {
                seq.push(Arc::new(parse_sequence(cur, rng, level + 1)?));
                true
            },

            ')' => {
                if level == 0 {
                    return error(cur, SyntaxErrorKind::ExtraClosingParenthesis);
                }
                if cur.lookahead() == Some('{') {
                    cur.advance();
                    let times = match parse_quantifier(cur)? {
                        Quantity::Exactly(n) => n.saturating_sub(1),
                        Quantity::Between(lo, hi) => rand_inclusive(rng, lo, hi),
                    };
                    trace!(level, times, nodes = seq.len(), "repeating group");
                    // The copies alias the already parsed nodes
                    let group = seq.clone();
                    for _ in 0..times {
                        seq.extend(group.iter().cloned());
                    }
                }
                closed = true;
                break;
            },

            '|' => {
                operator = Some(c);
                false
            },

            c if is_meta_char(c) => return error(cur, SyntaxErrorKind::UnescapedSpecial(c)),

            _ => {
                seq.push(Arc::new(parse_literal(cur, rng)));
                true
            },
        };

        if let Some(op) = operator {
            if left_operand.is_none() {
                match seq.pop() {
                    Some(left) => left_operand = Some(left),
                    None => return error(cur, SyntaxErrorKind::MissingLeftOperand(op)),
                }
            }
            else if appended {
                if let (Some(first), Some(second)) = (left_operand.take(), seq.pop()) {
                    seq.push(Arc::new(Node::Alternation{ first, second }));
                }
                operator = None;
            }
        }
    }

    if let Some(op) = operator {
        return error(cur, SyntaxErrorKind::MissingRightOperand(op));
    }
    if level > 0 && !closed {
        return error(cur, SyntaxErrorKind::MissingClosingParenthesis);
    }

    Ok(Node::Sequence(seq))
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod template_parser_tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /**
     * Helpers to construct results.
     */

    fn lit(s: &str) -> Arc<Node> {
        Arc::new(Node::Literal(s.into()))
    }

    fn set(chars: &str, quantity: Quantity) -> Arc<Node> {
        Arc::new(Node::CharacterSet{ chars: chars.chars().collect(), quantity })
    }

    fn seq(nodes: Vec<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::Sequence(nodes))
    }

    fn alt(first: Arc<Node>, second: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::Alternation{ first, second })
    }

    fn root(nodes: Vec<Arc<Node>>) -> std::result::Result<Node, SyntaxErrorKind> {
        Ok(Node::Sequence(nodes))
    }

    fn p(source: &str) -> std::result::Result<Node, SyntaxErrorKind> {
        p_seeded(source, 0)
    }

    fn p_seeded(source: &str, seed: u64) -> std::result::Result<Node, SyntaxErrorKind> {
        parse(source, &mut StdRng::seed_from_u64(seed)).map_err(|e| e.kind)
    }

    fn class_chars(source: &str) -> Vec<char> {
        match p(source) {
            Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                Node::CharacterSet{ chars, .. } => chars.clone(),
                other => panic!("not a character set: {:?}", other),
            },
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    fn literal_text(source: &str, seed: u64) -> String {
        match p_seeded(source, seed) {
            Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                Node::Literal(text) => text.clone(),
                other => panic!("not a literal: {:?}", other),
            },
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    /**
     * Structure.
     */

    #[test]
    fn empty() {
        assert_eq!(p(""), root(vec![]));
    }

    #[test]
    fn plain_literal() {
        assert_eq!(p("abc"), root(vec![lit("abc")]));
    }

    #[test]
    fn literal_with_hyphen_then_class() {
        assert_eq!(p("hel-lo[abc]{4}"), root(vec![lit("hel-lo"), set("abc", Quantity::Exactly(4))]));
    }

    #[test]
    fn literal_class_literal() {
        assert_eq!(p("ab[cd]ef"), root(vec![lit("ab"), set("cd", Quantity::Exactly(1)), lit("ef")]));
    }

    #[test]
    fn a_or_b() {
        assert_eq!(p("a|b"), root(vec![alt(lit("a"), lit("b"))]));
    }

    #[test]
    fn alternation_takes_whole_literal_runs() {
        assert_eq!(p("xa|by"), root(vec![alt(lit("xa"), lit("by"))]));
    }

    #[test]
    fn alternation_of_groups() {
        assert_eq!(
            p("(a)|(b)c"),
            root(vec![alt(seq(vec![lit("a")]), seq(vec![lit("b")])), lit("c")])
        );
    }

    #[test]
    fn doubled_operator_does_not_steal_operands() {
        assert_eq!(p("x[a]||b"), root(vec![lit("x"), alt(set("a", Quantity::Exactly(1)), lit("b"))]));
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            p("a(b(c|d))"),
            root(vec![lit("a"), seq(vec![lit("b"), seq(vec![alt(lit("c"), lit("d"))])])])
        );
    }

    #[test]
    fn group_repetition_exact() {
        assert_eq!(p("x(ab){3}"), root(vec![lit("x"), seq(vec![lit("ab"), lit("ab"), lit("ab")])]));
    }

    #[test]
    fn group_repetition_shares_nodes() {
        match p("(a[bc]){2}") {
            Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                Node::Sequence(group) => {
                    assert_eq!(group.len(), 4);
                    assert!(Arc::ptr_eq(&group[0], &group[2]));
                    assert!(Arc::ptr_eq(&group[1], &group[3]));
                },
                other => panic!("not a group: {:?}", other),
            },
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn group_repetition_includes_nested_groups() {
        assert_eq!(p("((a)b){2}"), root(vec![seq(vec![
            seq(vec![lit("a")]), lit("b"),
            seq(vec![lit("a")]), lit("b"),
        ])]));
    }

    #[test]
    fn group_repetition_zero_or_one_adds_nothing() {
        assert_eq!(p("(ab){0}"), root(vec![seq(vec![lit("ab")])]));
        assert_eq!(p("(ab){1}"), root(vec![seq(vec![lit("ab")])]));
    }

    #[test]
    fn group_repetition_range() {
        for seed in 0..20 {
            match p_seeded("(ab){1,3}", seed) {
                Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                    Node::Sequence(group) => assert!((2..=4).contains(&group.len())),
                    other => panic!("not a group: {:?}", other),
                },
                other => panic!("unexpected parse: {:?}", other),
            }
        }
    }

    /**
     * Character classes.
     */

    #[test]
    fn class_range_with_quantifier() {
        assert_eq!(p("[a-c]{2,4}"), root(vec![set("abc", Quantity::Between(2, 4))]));
        assert_eq!(p("[a-c]{2-4}"), root(vec![set("abc", Quantity::Between(2, 4))]));
    }

    #[test]
    fn class_multiple_ranges() {
        assert_eq!(p("[a-cx0-2]"), root(vec![set("abcx012", Quantity::Exactly(1))]));
    }

    #[test]
    fn reversed_range() {
        assert_eq!(p("[c-a]"), p("[a-c]"));
        assert_eq!(p("[z-a]"), p("[a-z]"));
    }

    #[test]
    fn leading_hyphen_is_a_member() {
        assert_eq!(p("[-+]?"), root(vec![set("-+", Quantity::Between(0, 1))]));
    }

    #[test]
    fn class_keeps_duplicates() {
        assert_eq!(class_chars("[aab]"), vec!['a', 'a', 'b']);
    }

    #[test]
    fn class_modifiers() {
        for seed in 0..10 {
            match p_seeded("[ab]*", seed) {
                Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                    Node::CharacterSet{ quantity: Quantity::Between(0, hi), .. } => assert!(*hi <= 5),
                    other => panic!("unexpected node: {:?}", other),
                },
                other => panic!("unexpected parse: {:?}", other),
            }
            match p_seeded("[ab]+", seed) {
                Ok(Node::Sequence(nodes)) => match &*nodes[0] {
                    Node::CharacterSet{ quantity: Quantity::Between(1, hi), .. } => assert!((1..=5).contains(hi)),
                    other => panic!("unexpected node: {:?}", other),
                },
                other => panic!("unexpected parse: {:?}", other),
            }
        }
    }

    #[test]
    fn class_followed_by_literal_hyphen() {
        assert_eq!(p("[ab]-x"), root(vec![set("ab", Quantity::Exactly(1)), lit("-x")]));
    }

    #[test]
    fn negated_class() {
        let chars = class_chars("[^a-z]");
        assert!(!chars.iter().any(|c| c.is_ascii_lowercase()));
        assert!(!chars.contains(&'^'));
        assert!(chars.contains(&'A'));
        assert!(chars.contains(&'0'));
        assert!(chars.contains(&' '));
        assert!(chars.contains(&'~'));
    }

    #[test]
    fn allowed_alphabet() {
        let chars = allowed_chars();
        // 10 digits, 52 letters, 6 whitespace, 32 punctuation
        assert_eq!(chars.len(), 100);
        assert!(chars.contains(&'\x0b'));
        assert!(!chars.contains(&'\0'));
    }

    #[test]
    fn character_range_limits() {
        assert_eq!(character_range('a', 'c'), Ok('a'..='c'));
        assert_eq!(character_range('c', 'a'), Ok('a'..='c'));
        assert_eq!(character_range('x', 'x'), Ok('x'..='x'));
        assert!(character_range('\u{0}', '\u{2710}').is_ok());
        assert_eq!(
            character_range('\u{0}', '\u{2711}'),
            Err(SyntaxErrorKind::RangeTooLarge{ from: '\u{0}', to: '\u{2711}' })
        );
    }

    /**
     * Literal modifiers.
     */

    #[test]
    fn optional_character() {
        for seed in 0..20 {
            let text = literal_text("colou?r", seed);
            assert!(text == "color" || text == "colour", "{}", text);
        }
    }

    #[test]
    fn repeated_character() {
        for seed in 0..20 {
            let plus = literal_text("ab+", seed);
            assert!(plus.starts_with('a'));
            assert!((1..=3).contains(&plus[1..].len()));
            assert!(plus[1..].chars().all(|c| c == 'b'));

            let star = literal_text("ab*", seed);
            assert!(star.starts_with('a'));
            assert!(star[1..].len() <= 3);
        }
    }

    #[test]
    fn modifier_before_meta_ends_the_run() {
        match p_seeded("ab?[c]", 1) {
            Ok(Node::Sequence(nodes)) => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(*nodes[1], Node::CharacterSet{ chars: vec!['c'], quantity: Quantity::Exactly(1) });
            },
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    /**
     * Errors.
     */

    #[test]
    fn syntax_errors() {
        use SyntaxErrorKind::*;

        let cases = [
            ("[a-z]{a}", NonDigitInCount('a')),
            ("[a-]", UnterminatedRange),
            ("[a-", UnterminatedRange),
            ("[[1-9]", UnescapedInClass('[')),
            ("((foo)(bar)))", ExtraClosingParenthesis),
            ("|foo", MissingLeftOperand('|')),
            ("(|foo)", MissingLeftOperand('|')),
            ("foo|", MissingRightOperand('|')),
            ("(foo|)", MissingRightOperand('|')),
            ("[1-10]{6:}", NonDigitInCount(':')),
            ("[a]{3,}", OpenQuantifierRange),
            ("[a]{3-}", OpenQuantifierRange),
            ("(a){2,}", OpenQuantifierRange),
            ("[a]{3", UnterminatedQuantifier),
            ("[a]{5,2}", InvertedQuantifier{ min: 5, max: 2 }),
            ("[a]{99999999999999999999999}", QuantifierOverflow),
            ("[a]{18446744073709551615}", RepeatTooLarge(usize::MAX)),
            ("[a]{1,10001}", RepeatTooLarge(10001)),
            ("(a){99999999999}", RepeatTooLarge(99999999999)),
            ("(abc", MissingClosingParenthesis),
            ("a(b(c)", MissingClosingParenthesis),
            ("a{3}", UnescapedSpecial('{')),
            ("ab]", UnescapedSpecial(']')),
            ("}", UnescapedSpecial('}')),
            ("[abc", UnterminatedClass),
            ("[]", EmptyClass),
            ("[\u{0}-\u{ffff}]", RangeTooLarge{ from: '\u{0}', to: '\u{ffff}' }),
        ];

        for (source, kind) in cases.iter() {
            assert_eq!(p(source).map(|_| ()), Err(*kind), "template {:?}", source);
        }
    }

    #[test]
    fn largest_repeat_is_accepted() {
        assert_eq!(p("[a]{10000}"), root(vec![set("a", Quantity::Exactly(10_000))]));
        assert_eq!(p("[a]{0,10000}"), root(vec![set("a", Quantity::Between(0, 10_000))]));
    }

    #[test]
    fn error_offsets() {
        let err = parse("ab)", &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, SyntaxError::new(SyntaxErrorKind::ExtraClosingParenthesis, 2));

        let err = parse("xy[[", &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.offset, 3);
    }
}
