/**
 * Rendering a compiled template.
 *
 * Rendering never touches the tree, all randomness is drawn on the fly, so
 * the same tree yields a fresh string on every call.
 */

use rand::Rng;
use sg_template_parse::Node;
use sg_template_parse::rnd::{coin, draw_count, rand_chars};

pub fn render<R>(node: &Node, rng: &mut R) -> String where R : Rng + ?Sized {
    let mut out = String::new();
    render_into(node, rng, &mut out);
    out
}

/// Appends one rendering of `node` to `out`.
pub fn render_into<R>(node: &Node, rng: &mut R, out: &mut String) where R : Rng + ?Sized {
    match node {
        Node::Literal(text) => out.push_str(text),

        Node::CharacterSet{ chars, quantity } => {
            let count = draw_count(rng, *quantity);
            rand_chars(rng, count, chars, out);
        },

        Node::Sequence(children) => {
            for child in children {
                render_into(child, rng, out);
            }
        },

        Node::Alternation{ first, second } => {
            let branch = if coin(rng) { second } else { first };
            render_into(branch, rng, out);
        },
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
