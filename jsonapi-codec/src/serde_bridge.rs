//! Element converter for any serde resource type

use crate::context::WriteContext;
use crate::converter::ElementConverter;
use crate::shape::{Describe, Shape};
use jsonapi_format::{JsonApiError, Result};
use jsonapi_stream::{TokenReader, TokenWriter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Converts resource types through `serde_json::Value`
///
/// The element is materialized from the cursor and handed to serde; serde
/// failures become [`JsonApiError::Element`] carrying the element path.
pub struct SerdeResourceConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeResourceConverter<T> {
    /// Create a converter for `T`
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeResourceConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeResourceConverter<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeResourceConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeResourceConverter")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> ElementConverter for SerdeResourceConverter<T>
where
    T: Serialize + DeserializeOwned + Describe,
{
    type Element = T;

    fn can_convert(&self, shape: &Shape) -> bool {
        shape.is_resource() && *shape == T::shape()
    }

    fn read(&self, reader: &mut TokenReader) -> Result<T> {
        let path = reader.next_value_path().to_string();
        let value = reader.read_value()?;
        serde_json::from_value(value).map_err(|e| JsonApiError::element(path, e))
    }

    fn write(&self, writer: &mut TokenWriter, value: &T, _ctx: &mut dyn WriteContext) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| JsonApiError::element(writer.path().to_string(), e))?;
        writer.write_value(value)
    }
}
