//! The surface front-end sugar (§6): a compact, serde-deserializable AST for
//! `preserve`/`add`/`remove`/`replace`/`drop`/`any` atoms plus `;`/`else`
//! combinators, desugared into `rir_lang::Spec` values. Lives entirely
//! outside `rir-lang`/`rir-verify` so the decision procedure never depends on
//! it; only `rir-cli` reads this format.

use rir_lang::{Prop, Rel, RirError, Spec};
use serde::Deserialize;

/// The sugar's regex sublanguage — the same shape as `Prop`, kept separate so
/// the wire format doesn't leak `rir_lang`'s internal `PreState`/`PostState`
/// leaves (which have no surface-syntax counterpart).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SugarProp {
    Symbol(String),
    Predicate { field: String, value: String },
    NegSymbols(Vec<String>),
    EmptySet,
    Epsilon,
    Union(Vec<SugarProp>),
    Concat(Vec<SugarProp>),
    Star(Box<SugarProp>),
    Intersect(Vec<SugarProp>),
    Complement(Box<SugarProp>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SugarModifier {
    Preserve,
    Add(SugarProp),
    Remove(SugarProp),
    Replace(SugarProp, SugarProp),
    Drop,
    Any(SugarProp),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SugarExpr {
    Atomic { r: SugarProp, m: SugarModifier },
    Concat(Box<SugarExpr>, Box<SugarExpr>),
    Else(Box<SugarExpr>, Box<SugarExpr>),
}

/// Holds the fresh-symbol counter `any(p)` needs (`#k`, one per compilation,
/// not per `Any` atom reuse across files).
pub struct Compiler {
    next_fresh: u32,
}

impl Compiler {
    pub fn new() -> Self {
        Self { next_fresh: 0 }
    }

    fn fresh_symbol(&mut self) -> Result<Prop, RirError> {
        self.next_fresh += 1;
        Prop::symbol(format!("#{}", self.next_fresh))
    }

    fn prop(&self, expr: &SugarProp) -> Result<Prop, RirError> {
        Ok(match expr {
            SugarProp::Symbol(s) => Prop::symbol(s)?,
            SugarProp::Predicate { field, value } => Prop::predicate(field.as_str(), value.as_str())?,
            SugarProp::NegSymbols(syms) => {
                let mut collected = Vec::with_capacity(syms.len());
                for s in syms {
                    collected.push(rir_core::Symbol::try_new(s.clone()).map_err(rir_core::CoreError::from)?);
                }
                Prop::neg_symbols(collected)
            }
            SugarProp::EmptySet => Prop::EmptySet,
            SugarProp::Epsilon => Prop::Epsilon,
            SugarProp::Union(args) => Prop::union(args.iter().map(|a| self.prop(a)).collect::<Result<_, _>>()?)?,
            SugarProp::Concat(args) => Prop::concat(args.iter().map(|a| self.prop(a)).collect::<Result<_, _>>()?)?,
            SugarProp::Star(arg) => Prop::star(self.prop(arg)?),
            SugarProp::Intersect(args) => Prop::intersect(args.iter().map(|a| self.prop(a)).collect::<Result<_, _>>()?)?,
            SugarProp::Complement(arg) => Prop::complement(self.prop(arg)?),
        })
    }

    /// Returns `(pre, post, domain)` for one sugar expression, per the §6
    /// compilation table.
    fn expr(&mut self, expr: &SugarExpr) -> Result<(Rel, Rel, Prop), RirError> {
        match expr {
            SugarExpr::Atomic { r, m } => self.atomic(r, m),
            SugarExpr::Concat(s1, s2) => {
                let (pre1, post1, dom1) = self.expr(s1)?;
                let (pre2, post2, dom2) = self.expr(s2)?;
                Ok((
                    Rel::concat(vec![pre1, pre2])?,
                    Rel::concat(vec![post1, post2])?,
                    Prop::concat(vec![dom1, dom2])?,
                ))
            }
            SugarExpr::Else(s1, s2) => {
                let (pre1, post1, dom1) = self.expr(s1)?;
                let (pre2, post2, dom2) = self.expr(s2)?;
                let not_dom1 = Prop::complement(dom1.clone());
                let pre = Rel::union(vec![pre1, Rel::compose(vec![Rel::identity(not_dom1.clone()), pre2])?])?;
                let post = Rel::union(vec![post1, Rel::compose(vec![Rel::identity(not_dom1), post2])?])?;
                let dom = Prop::union(vec![dom1, dom2])?;
                Ok((pre, post, dom))
            }
        }
    }

    fn atomic(&mut self, r: &SugarProp, m: &SugarModifier) -> Result<(Rel, Rel, Prop), RirError> {
        let d = self.prop(r)?;
        match m {
            SugarModifier::Preserve => Ok((Rel::identity(d.clone()), Rel::identity(d.clone()), d)),
            SugarModifier::Add(p) => {
                let p = self.prop(p)?;
                let d_or_p = Prop::union(vec![d.clone(), p.clone()])?;
                let pre = Rel::union(vec![Rel::identity(d_or_p.clone()), d * p])?;
                Ok((pre, Rel::identity(d_or_p.clone()), d_or_p))
            }
            SugarModifier::Remove(p) => {
                let p = self.prop(p)?;
                let d_and_not_p = Prop::intersect(vec![d.clone(), Prop::complement(p)])?;
                Ok((Rel::identity(d_and_not_p), Rel::identity(d.clone()), d))
            }
            SugarModifier::Replace(p1, p2) => {
                let p1 = self.prop(p1)?;
                let p2 = self.prop(p2)?;
                let d_or_p2 = Prop::union(vec![d.clone(), p2.clone()])?;
                let kept = Prop::intersect(vec![d_or_p2.clone(), Prop::complement(p1.clone())])?;
                let moved = Prop::intersect(vec![d, p1])?;
                let pre = Rel::union(vec![Rel::identity(kept), moved * p2])?;
                Ok((pre, Rel::identity(d_or_p2.clone()), d_or_p2))
            }
            SugarModifier::Drop => {
                let drop = Prop::symbol("drop")?;
                let d_or_drop = Prop::union(vec![d, drop.clone()])?;
                Ok((d_or_drop.clone() * drop, Rel::identity(d_or_drop.clone()), d_or_drop))
            }
            SugarModifier::Any(p) => {
                let p = self.prop(p)?;
                let sharp = self.fresh_symbol()?;
                let d_or_p = Prop::union(vec![d.clone(), p.clone()])?;
                let d_and_not_p = Prop::intersect(vec![d.clone(), Prop::complement(p.clone())])?;
                let pre = d_or_p.clone() * sharp.clone();
                let post = Rel::union(vec![p * sharp, Rel::identity(d_and_not_p)])?;
                Ok((pre, post, d_or_p))
            }
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles a sugar expression into the atomic RIR spec `preState ▶ pre =
/// postState ▶ post` (§6). Each call gets its own fresh-symbol counter.
pub fn compile(expr: &SugarExpr) -> Result<Spec, RirError> {
    let (pre, post, _domain) = Compiler::new().expr(expr)?;
    Ok(Prop::PreState.image(pre).eq_spec(Prop::PostState.image(post)))
}
