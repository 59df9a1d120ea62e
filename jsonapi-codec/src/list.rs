//! List type adapter: recognizing list shapes and building concrete lists

use crate::shape::{Describe, Shape};
use jsonapi_format::Result;
use smallvec::SmallVec;
use std::collections::{LinkedList, VecDeque};

/// Element shape of a list shape, or `None` if the shape is not a list
pub fn element_shape(shape: &Shape) -> Option<&Shape> {
    match shape {
        Shape::List(element) => Some(element),
        _ => None,
    }
}

/// Ordered native collection the list converter can produce and consume
pub trait ListType: Describe + Sized {
    /// Element type
    type Element;

    /// Build the collection by pulling `elements` in order
    ///
    /// Stops at the first error; no partially built list is returned.
    fn build<I>(elements: I) -> Result<Self>
    where
        I: Iterator<Item = Result<Self::Element>>;

    /// Elements in iteration order
    fn elements(&self) -> impl Iterator<Item = &Self::Element>;
}

macro_rules! collect_list {
    ($($list:ident),+) => {
        $(
            impl<T: Describe> Describe for $list<T> {
                fn shape() -> Shape {
                    Shape::List(Box::new(T::shape()))
                }
            }

            impl<T: Describe> ListType for $list<T> {
                type Element = T;

                fn build<I>(elements: I) -> Result<Self>
                where
                    I: Iterator<Item = Result<T>>,
                {
                    elements.collect()
                }

                fn elements(&self) -> impl Iterator<Item = &T> {
                    self.iter()
                }
            }
        )+
    };
}

collect_list!(Vec, VecDeque, LinkedList);

impl<T: Describe> Describe for Box<[T]> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<T: Describe> ListType for Box<[T]> {
    type Element = T;

    fn build<I>(elements: I) -> Result<Self>
    where
        I: Iterator<Item = Result<T>>,
    {
        elements
            .collect::<Result<Vec<T>>>()
            .map(Vec::into_boxed_slice)
    }

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<A> Describe for SmallVec<A>
where
    A: smallvec::Array,
    A::Item: Describe,
{
    fn shape() -> Shape {
        Shape::List(Box::new(<A::Item as Describe>::shape()))
    }
}

impl<A> ListType for SmallVec<A>
where
    A: smallvec::Array,
    A::Item: Describe,
{
    type Element = A::Item;

    fn build<I>(elements: I) -> Result<Self>
    where
        I: Iterator<Item = Result<A::Item>>,
    {
        elements.collect()
    }

    fn elements(&self) -> impl Iterator<Item = &A::Item> {
        self.iter()
    }
}
