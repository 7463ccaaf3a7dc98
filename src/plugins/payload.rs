//! Payload extraction helpers shared by the catalog's action handlers.

use crate::graph::DispatchError ;
use crate::value::Value ;



pub(crate) fn field<'a>( payload: &'a Value, action: &str, key: &str ) -> Result<&'a Value, DispatchError> {
    payload.get( key ).ok_or_else(|| DispatchError::invalid_payload(
        action,
        format!( "missing field '{}'", key ),
    ))
}

pub(crate) fn text_field( payload: &Value, action: &str, key: &str ) -> Result<String, DispatchError> {
    field( payload, action, key )?
        .as_text()
        .map( str::to_string )
        .ok_or_else(|| DispatchError::invalid_payload( action, format!( "field '{}' must be text", key )))
}

pub(crate) fn int_field( payload: &Value, action: &str, key: &str ) -> Result<i64, DispatchError> {
    field( payload, action, key )?
        .as_int()
        .ok_or_else(|| DispatchError::invalid_payload( action, format!( "field '{}' must be an integer", key )))
}

pub(crate) fn float_field( payload: &Value, action: &str, key: &str ) -> Result<f64, DispatchError> {
    field( payload, action, key )?
        .as_float()
        .ok_or_else(|| DispatchError::invalid_payload( action, format!( "field '{}' must be a number", key )))
}

/// An optional boolean field; absent reads as `false`.
pub(crate) fn flag( payload: &Value, key: &str ) -> bool {
    payload.get( key ).and_then( Value::as_bool ).unwrap_or( false )
}
