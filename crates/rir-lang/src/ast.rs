use crate::error::RirError;
use rir_core::Symbol;
use rir_netchange::PrefixGuard;
use std::sync::Arc;

/// A regular set of paths (§3). `Union`/`Concat`/`Intersect` are variadic
/// (≥2 operands, enforced by their smart constructors); binary operator sugar
/// always builds a valid two-operand node directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    Symbol(Symbol),
    Predicate { field: Arc<str>, value: Arc<str> },
    NegSymbols(Vec<Symbol>),
    EmptySet,
    Epsilon,
    PreState,
    PostState,
    Union(Vec<Prop>),
    Concat(Vec<Prop>),
    Star(Box<Prop>),
    Intersect(Vec<Prop>),
    Complement(Box<Prop>),
    Image(Box<Prop>, Box<Rel>),
    ReverseImage(Box<Prop>, Box<Rel>),
}

fn require_min_args<T>(ctor: &'static str, args: &[T], min: usize) -> Result<(), RirError> {
    if args.len() < min {
        Err(RirError::TooFewArgs {
            ctor,
            got: args.len(),
        })
    } else {
        Ok(())
    }
}

impl Prop {
    pub fn symbol(s: impl AsRef<str>) -> Result<Self, RirError> {
        let symbol = Symbol::try_new(s.as_ref().to_string()).map_err(rir_core::CoreError::from)?;
        Ok(Prop::Symbol(symbol))
    }

    pub fn predicate(field: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Result<Self, RirError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RirError::EmptyPredicateValue("PPredicate"));
        }
        Ok(Prop::Predicate {
            field: field.into(),
            value,
        })
    }

    pub fn neg_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Prop::NegSymbols(symbols.into_iter().collect())
    }

    /// `pDot`: matches any single alphabet symbol.
    pub fn dot() -> Self {
        Prop::NegSymbols(Vec::new())
    }

    pub fn union(args: Vec<Prop>) -> Result<Self, RirError> {
        require_min_args("PUnion", &args, 2)?;
        Ok(Prop::Union(args))
    }

    pub fn concat(args: Vec<Prop>) -> Result<Self, RirError> {
        require_min_args("PConcat", &args, 2)?;
        Ok(Prop::Concat(args))
    }

    pub fn intersect(args: Vec<Prop>) -> Result<Self, RirError> {
        require_min_args("PIntersect", &args, 2)?;
        Ok(Prop::Intersect(args))
    }

    pub fn star(arg: Prop) -> Self {
        Prop::Star(Box::new(arg))
    }

    pub fn complement(arg: Prop) -> Self {
        Prop::Complement(Box::new(arg))
    }

    pub fn image(self, rel: Rel) -> Prop {
        Prop::Image(Box::new(self), Box::new(rel))
    }

    pub fn reverse_image(self, rel: Rel) -> Prop {
        Prop::ReverseImage(Box::new(self), Box::new(rel))
    }

    pub fn eq_spec(self, other: Prop) -> Spec {
        Spec::Equal(Box::new(self), Box::new(other))
    }

    pub fn subseteq_spec(self, other: Prop) -> Spec {
        Spec::SubsetEq(Box::new(self), Box::new(other))
    }
}

impl std::ops::Add for Prop {
    type Output = Prop;
    fn add(self, rhs: Prop) -> Prop {
        Prop::Concat(vec![self, rhs])
    }
}

impl std::ops::BitOr for Prop {
    type Output = Prop;
    fn bitor(self, rhs: Prop) -> Prop {
        Prop::Union(vec![self, rhs])
    }
}

impl std::ops::Not for Prop {
    type Output = Prop;
    fn not(self) -> Prop {
        Prop::complement(self)
    }
}

impl std::ops::Mul for Prop {
    type Output = Rel;
    fn mul(self, rhs: Prop) -> Rel {
        Rel::Product(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Shr<Rel> for Prop {
    type Output = Prop;
    fn shr(self, rel: Rel) -> Prop {
        self.image(rel)
    }
}

/// A rational relation on path pairs (§3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rel {
    Product(Box<Prop>, Box<Prop>),
    Identity(Box<Prop>),
    EmptySet,
    Epsilon,
    Union(Vec<Rel>),
    Concat(Vec<Rel>),
    Star(Box<Rel>),
    Compose(Vec<Rel>),
    PriorityUnion(Vec<Rel>),
}

impl Rel {
    pub fn identity(arg: Prop) -> Self {
        Rel::Identity(Box::new(arg))
    }

    pub fn union(args: Vec<Rel>) -> Result<Self, RirError> {
        require_min_args("RUnion", &args, 2)?;
        Ok(Rel::Union(args))
    }

    pub fn concat(args: Vec<Rel>) -> Result<Self, RirError> {
        require_min_args("RConcat", &args, 2)?;
        Ok(Rel::Concat(args))
    }

    pub fn compose(args: Vec<Rel>) -> Result<Self, RirError> {
        require_min_args("RCompose", &args, 2)?;
        Ok(Rel::Compose(args))
    }

    pub fn priority_union(args: Vec<Rel>) -> Result<Self, RirError> {
        require_min_args("RPriorityUnion", &args, 2)?;
        Ok(Rel::PriorityUnion(args))
    }

    pub fn star(arg: Rel) -> Self {
        Rel::Star(Box::new(arg))
    }

    pub fn reverse_image(self, prop: Prop) -> Prop {
        prop.reverse_image(self)
    }
}

impl std::ops::BitOr for Rel {
    type Output = Rel;
    fn bitor(self, rhs: Rel) -> Rel {
        Rel::Union(vec![self, rhs])
    }
}

impl std::ops::Add for Rel {
    type Output = Rel;
    fn add(self, rhs: Rel) -> Rel {
        Rel::Concat(vec![self, rhs])
    }
}

impl std::ops::Div for Rel {
    /// `//` has no stand-alone operator in Rust; priority union is sugared
    /// onto `/` (division has no other meaning for `Rel`).
    type Output = Rel;
    fn div(self, rhs: Rel) -> Rel {
        Rel::PriorityUnion(vec![self, rhs])
    }
}

impl std::ops::Shl<Prop> for Rel {
    type Output = Prop;
    fn shl(self, prop: Prop) -> Prop {
        prop.reverse_image(self)
    }
}

/// A decidable judgment over `Prop`s (§3). `PrefixIte` carries the guard used
/// by `rir-verify`'s branch-resolution loop directly, since the guard has no
/// other consumer.
#[derive(Debug, Clone)]
pub enum Spec {
    Equal(Box<Prop>, Box<Prop>),
    SubsetEq(Box<Prop>, Box<Prop>),
    Not(Box<Spec>),
    And(Box<Spec>, Box<Spec>),
    Or(Box<Spec>, Box<Spec>),
    PrefixIte {
        then_branch: Box<Spec>,
        else_branch: Box<Spec>,
        guard: PrefixGuard,
    },
}

impl Spec {
    pub fn prefix_ite(then_branch: Spec, else_branch: Spec, guard: PrefixGuard) -> Self {
        Spec::PrefixIte {
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            guard,
        }
    }
}

impl std::ops::BitOr for Spec {
    type Output = Spec;
    fn bitor(self, rhs: Spec) -> Spec {
        Spec::Or(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::BitAnd for Spec {
    type Output = Spec;
    fn bitand(self, rhs: Spec) -> Spec {
        Spec::And(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Not for Spec {
    type Output = Spec;
    fn not(self) -> Spec {
        Spec::Not(Box::new(self))
    }
}
