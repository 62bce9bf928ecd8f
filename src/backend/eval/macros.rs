//! Argument-count checks shared by the special forms.
//!
//! `$items` is the full expression including its head, so `$expected` counts
//! arguments only. On mismatch the enclosing function returns a single Error
//! atom whose source is the whole expression.

macro_rules! require_args {
    ($op:expr, $items:expr, $expected:expr) => {
        if $items.len() != $expected + 1 {
            let err = Atom::error_at(
                format!(
                    "{} requires exactly {} argument{}, got {}",
                    $op,
                    $expected,
                    if $expected == 1 { "" } else { "s" },
                    $items.len() - 1
                ),
                Atom::Expression($items.to_vec()),
            );
            return vec![err];
        }
    };
}

macro_rules! require_one_arg {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 1)
    };
}

macro_rules! require_two_args {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 2)
    };
}

macro_rules! require_three_args {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 3)
    };
}

/// Like `require_args!` but for forms with a variable argument count
macro_rules! require_args_between {
    ($op:expr, $items:expr, $min:expr, $max:expr, $usage:expr) => {
        if $items.len() < $min + 1 || $items.len() > $max + 1 {
            let err = Atom::error_at(
                format!("{} expects {}", $op, $usage),
                Atom::Expression($items.to_vec()),
            );
            return vec![err];
        }
    };
}
