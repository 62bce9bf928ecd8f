//! The prelude: a handful of rules written in the language itself.

use crate::backend::models::Atom;
use crate::backend::space::Space;

/// Source of the prelude, run through the normal evaluator
pub const PRELUDE: &str = r#"
; Identity and composition
(= (id $x) $x)
(= (compose $f $g $x) ($f ($g $x)))

; Lists are Nil or (Cons head tail)
(= (cons $h $t) (Cons $h $t))
(= (head (Cons $h $t)) $h)
(= (tail (Cons $h $t)) $t)
(= (nil? Nil) True)
(= (nil? (Cons $h $t)) False)

; Negation over the truth symbols
(= (not True) False)
(= (not False) True)

; Structural equality
(= (eq $x $x) True)

; Type predicates
(= (is-number $x) (== (get-type $x) Number))
(= (is-string $x) (== (get-type $x) String))
(= (is-bool $x) (== (get-type $x) Bool))
(= (is-symbol $x) (== (get-type $x) Symbol))
(= (is-expression $x) (== (get-type $x) Expression))
"#;

/// Name of the rule that makes `eq` answer `False` when the reflexive rule fails
pub const EQ_FALLBACK_RULE: &str = "stdlib-eq-fallback";

/// Rules that cannot be written in the prelude text because they need a priority
pub fn install_fallbacks(space: &mut Space) {
    space.define(
        EQ_FALLBACK_RULE,
        Atom::expr(vec![Atom::sym("eq"), Atom::var("x"), Atom::var("y")]),
        Atom::sym("False"),
        -1,
    );
}
