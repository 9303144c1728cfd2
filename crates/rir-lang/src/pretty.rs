//! Structural pretty-printing with minimal parenthesization driven by
//! operator precedence (§4.2): concat > union; complement binds tighter than
//! intersect/union; image/reverse-image parenthesize inside concat/union/
//! intersect. One free function per AST family, each matching on the tag and
//! recursing, per the no-inheritance visitor-dispatch design note.

use crate::ast::{Prop, Rel, Spec};
use std::fmt::Write as _;

pub fn pretty_prop(p: &Prop) -> String {
    let mut out = String::new();
    write_prop(&mut out, p);
    out
}

pub fn pretty_rel(r: &Rel) -> String {
    let mut out = String::new();
    write_rel(&mut out, r);
    out
}

pub fn pretty_spec(s: &Spec) -> String {
    let mut out = String::new();
    write_spec(&mut out, s);
    out
}

fn needs_parens_in_concat(p: &Prop) -> bool {
    matches!(
        p,
        Prop::Union(_) | Prop::Intersect(_) | Prop::Complement(_) | Prop::Image(..) | Prop::ReverseImage(..)
    ) || matches!(p, Prop::Symbol(s) if s.as_str().chars().count() > 1)
}

fn needs_parens_in_union(p: &Prop) -> bool {
    matches!(p, Prop::Intersect(_) | Prop::Image(..) | Prop::ReverseImage(..))
}

fn needs_parens_in_intersect(p: &Prop) -> bool {
    matches!(p, Prop::Union(_) | Prop::Complement(_) | Prop::Image(..) | Prop::ReverseImage(..))
}

fn needs_parens_under_image(p: &Prop) -> bool {
    matches!(
        p,
        Prop::Union(_) | Prop::Intersect(_) | Prop::Image(..) | Prop::ReverseImage(..)
    )
}

fn needs_parens_in_complement(p: &Prop) -> bool {
    matches!(p, Prop::Union(_) | Prop::Intersect(_) | Prop::Image(..) | Prop::ReverseImage(..))
}

fn rel_needs_parens_under_image(r: &Rel) -> bool {
    matches!(r, Rel::Union(_) | Rel::Product(..))
}

fn write_prop(out: &mut String, p: &Prop) {
    match p {
        Prop::Symbol(s) => {
            let _ = write!(out, "{s}");
        }
        Prop::Predicate { field, value } => {
            let _ = write!(out, "{{{field}={value}}}");
        }
        Prop::NegSymbols(symbols) => {
            if symbols.is_empty() {
                out.push('.');
            } else {
                out.push_str("[^");
                for s in symbols {
                    if s.as_str().chars().count() == 1 {
                        out.push_str(s.as_str());
                    } else {
                        let _ = write!(out, "({s})");
                    }
                }
                out.push(']');
            }
        }
        Prop::EmptySet => out.push('0'),
        Prop::Epsilon => out.push('1'),
        Prop::PreState => out.push_str("preState"),
        Prop::PostState => out.push_str("postState"),
        Prop::Concat(args) => {
            for arg in args {
                if needs_parens_in_concat(arg) {
                    out.push('(');
                    write_prop(out, arg);
                    out.push(')');
                } else {
                    write_prop(out, arg);
                }
            }
        }
        Prop::Union(args) => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(" + ");
                }
                if needs_parens_in_union(arg) {
                    out.push('(');
                    write_prop(out, arg);
                    out.push(')');
                } else {
                    write_prop(out, arg);
                }
            }
        }
        Prop::Star(arg) => {
            if matches!(arg.as_ref(), Prop::Symbol(_) | Prop::NegSymbols(_)) {
                write_prop(out, arg);
            } else {
                out.push('(');
                write_prop(out, arg);
                out.push(')');
            }
            out.push('*');
        }
        Prop::Intersect(args) => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(" \u{2229} ");
                }
                if needs_parens_in_intersect(arg) {
                    out.push('(');
                    write_prop(out, arg);
                    out.push(')');
                } else {
                    write_prop(out, arg);
                }
            }
        }
        Prop::Complement(arg) => {
            out.push('~');
            if needs_parens_in_complement(arg) {
                out.push('(');
                write_prop(out, arg);
                out.push(')');
            } else {
                write_prop(out, arg);
            }
        }
        Prop::Image(prop, rel) => {
            if needs_parens_under_image(prop) {
                out.push('(');
                write_prop(out, prop);
                out.push(')');
            } else {
                write_prop(out, prop);
            }
            out.push_str(" \u{25B6} ");
            if rel_needs_parens_under_image(rel) {
                out.push('(');
                write_rel(out, rel);
                out.push(')');
            } else {
                write_rel(out, rel);
            }
        }
        Prop::ReverseImage(prop, rel) => {
            if rel_needs_parens_under_image(rel) {
                out.push('(');
                write_rel(out, rel);
                out.push(')');
            } else {
                write_rel(out, rel);
            }
            out.push_str(" \u{25C0} ");
            if needs_parens_under_image(prop) {
                out.push('(');
                write_prop(out, prop);
                out.push(')');
            } else {
                write_prop(out, prop);
            }
        }
    }
}

fn write_rel(out: &mut String, r: &Rel) {
    match r {
        Rel::Product(p, q) => {
            if needs_parens_under_image(p) {
                out.push('(');
                write_prop(out, p);
                out.push(')');
            } else {
                write_prop(out, p);
            }
            out.push_str(" x ");
            if needs_parens_under_image(q) {
                out.push('(');
                write_prop(out, q);
                out.push(')');
            } else {
                write_prop(out, q);
            }
        }
        Rel::Identity(arg) => {
            out.push_str("I(");
            write_prop(out, arg);
            out.push(')');
        }
        Rel::EmptySet => out.push('0'),
        Rel::Epsilon => out.push('1'),
        Rel::Concat(args) => {
            for arg in args {
                if rel_needs_parens_under_image(arg) {
                    out.push('(');
                    write_rel(out, arg);
                    out.push(')');
                } else {
                    write_rel(out, arg);
                }
            }
        }
        Rel::Union(args) => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(" + ");
                }
                if matches!(arg, Rel::Product(..)) {
                    out.push('(');
                    write_rel(out, arg);
                    out.push(')');
                } else {
                    write_rel(out, arg);
                }
            }
        }
        Rel::Star(arg) => {
            if matches!(arg.as_ref(), Rel::Concat(_) | Rel::Union(_) | Rel::Product(..)) {
                out.push('(');
                write_rel(out, arg);
                out.push(')');
            } else {
                write_rel(out, arg);
            }
            out.push('*');
        }
        Rel::Compose(args) => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(" o ");
                }
                if matches!(arg, Rel::Product(..)) {
                    out.push('(');
                    write_rel(out, arg);
                    out.push(')');
                } else {
                    write_rel(out, arg);
                }
            }
        }
        Rel::PriorityUnion(args) => {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(" // ");
                }
                if matches!(arg, Rel::Product(..)) {
                    out.push('(');
                    write_rel(out, arg);
                    out.push(')');
                } else {
                    write_rel(out, arg);
                }
            }
        }
    }
}

fn write_spec(out: &mut String, s: &Spec) {
    match s {
        Spec::Equal(p, q) => {
            write_prop(out, p);
            out.push_str(" = ");
            write_prop(out, q);
        }
        Spec::SubsetEq(p, q) => {
            write_prop(out, p);
            out.push_str(" \u{2286} ");
            write_prop(out, q);
        }
        Spec::Not(arg) => {
            out.push_str("~(");
            write_spec(out, arg);
            out.push(')');
        }
        Spec::And(p, q) => {
            out.push('(');
            write_spec(out, p);
            out.push_str(") & (");
            write_spec(out, q);
            out.push(')');
        }
        Spec::Or(p, q) => {
            out.push('(');
            write_spec(out, p);
            out.push_str(") | (");
            write_spec(out, q);
            out.push(')');
        }
        Spec::PrefixIte {
            then_branch,
            else_branch,
            guard,
        } => {
            let _ = write!(out, "IF {guard} THEN ");
            write_spec(out, then_branch);
            out.push_str(" ELSE ");
            write_spec(out, else_branch);
        }
    }
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&pretty_prop(self))
    }
}

impl std::fmt::Display for Rel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&pretty_rel(self))
    }
}

impl std::fmt::Display for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&pretty_spec(self))
    }
}
