use crate::scalar::Scalar;
use std::fmt;

/// Operator carried by a [`Node`](super::Node).
///
/// Each variant owns both of its rules: [`Op::forward`] computes the node's
/// value from its input values, [`Op::backward`] computes the gradient
/// contribution flowing into each input. Adding an operator means adding a
/// variant and filling in the three `match`es below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Graph input. Receives its value positionally from `Graph::forward`.
    Input,
    /// Graph output. Passes its single input through unchanged.
    Output,
    /// Source node whose value is fixed when the graph is built.
    Constant,
    Add,
    Multiply,
    Relu,
    Exp,
    /// Inner product of the first and second halves of the input list.
    Dot,
    Reciprocal,
}

/// Number of inputs an [`Op`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Exactly(usize),
    AtLeast(usize),
    /// A nonempty, even-length list split into two operand vectors.
    EvenPairs,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::None => count == 0,
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::EvenPairs => count > 0 && count % 2 == 0,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::None => write!(f, "no"),
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::EvenPairs => write!(f, "a nonempty even number of"),
        }
    }
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Input => "input",
            Op::Output => "output",
            Op::Constant => "constant",
            Op::Add => "add",
            Op::Multiply => "multiply",
            Op::Relu => "relu",
            Op::Exp => "exp",
            Op::Dot => "dot",
            Op::Reciprocal => "reciprocal",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Op::Input | Op::Constant => Arity::None,
            Op::Output | Op::Relu | Op::Exp | Op::Reciprocal => Arity::Exactly(1),
            Op::Add | Op::Multiply => Arity::AtLeast(2),
            Op::Dot => Arity::EvenPairs,
        }
    }

    /// Source nodes have no inputs; forward traversal starts from them.
    pub fn is_source(self) -> bool {
        matches!(self, Op::Input | Op::Constant)
    }

    /// Computes the value of a node from the values of its inputs.
    ///
    /// `current` is the node's present value, returned unchanged by source
    /// operators (`Input`, `Constant`).
    ///
    /// # Panics
    /// Panics if `inputs` does not satisfy [`Op::arity`]. Graphs validate
    /// arity at construction, so this cannot happen through `Graph::forward`.
    pub fn forward<T: Scalar>(self, inputs: &[T], current: T) -> T {
        match self {
            Op::Input | Op::Constant => current,
            Op::Output => inputs[0],
            Op::Add => inputs.iter().fold(T::zero(), |acc, &x| acc + x),
            Op::Multiply => inputs.iter().fold(T::one(), |acc, &x| acc * x),
            Op::Relu => {
                if inputs[0] > T::zero() {
                    inputs[0]
                } else {
                    T::zero()
                }
            }
            Op::Exp => inputs[0].exp(),
            Op::Reciprocal => inputs[0].recip(),
            Op::Dot => {
                let (left, right) = inputs.split_at(inputs.len() / 2);
                left.iter()
                    .zip(right)
                    .fold(T::zero(), |acc, (&l, &r)| acc + l * r)
            }
        }
    }

    /// Computes the gradient contribution into each input, given the node's
    /// accumulated upstream gradient and its forward `value`.
    ///
    /// The returned vector is aligned with `inputs`: entry `i` is what the
    /// caller must add (`+=`) into the accumulator of input `i`. A node that
    /// lists the same input twice therefore contributes twice.
    ///
    /// # Panics
    /// Same contract as [`Op::forward`].
    pub fn backward<T: Scalar>(self, inputs: &[T], value: T, upstream: T) -> Vec<T> {
        match self {
            Op::Input | Op::Constant => Vec::new(),
            Op::Output | Op::Add => vec![upstream; inputs.len()],
            Op::Multiply => product_of_others(inputs)
                .into_iter()
                .map(|others| upstream * others)
                .collect(),
            Op::Relu => {
                if inputs[0] > T::zero() {
                    vec![upstream]
                } else {
                    vec![T::zero()]
                }
            }
            Op::Exp => vec![upstream * value],
            // d(1/x)/dx = -1/x^2 = -value^2
            Op::Reciprocal => vec![upstream * -(value * value)],
            Op::Dot => {
                let (left, right) = inputs.split_at(inputs.len() / 2);
                right
                    .iter()
                    .chain(left)
                    .map(|&other| upstream * other)
                    .collect()
            }
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// For each factor, the product of every other factor.
///
/// Prefix/suffix products, so zero factors need no division and the result is
/// exact for any factor count.
pub(crate) fn product_of_others<T: Scalar>(factors: &[T]) -> Vec<T> {
    let mut out = vec![T::one(); factors.len()];
    let mut prefix = T::one();
    for (slot, &factor) in out.iter_mut().zip(factors) {
        *slot = prefix;
        prefix *= factor;
    }
    let mut suffix = T::one();
    for (slot, &factor) in out.iter_mut().zip(factors).rev() {
        *slot *= suffix;
        suffix *= factor;
    }
    out
}
