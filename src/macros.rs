//! Convenience macros for Nexa identifiers.
//!
//! Both macros validate their argument at compile time, so a literal unit or
//! controller id that does not fit the frame is a build error instead of a
//! runtime `Err`.

/// Creates a [`Unit`](crate::addressing::Unit) from a literal.
///
/// # Examples
///
/// ```
/// use nexa_pico::unit;
///
/// let kitchen = unit!(3);
/// assert_eq!(kitchen.raw(), 3);
/// ```
///
/// # Compile-Time Validation
///
/// ```compile_fail
/// // Units are 0-15
/// let u = nexa_pico::unit!(16);
/// ```
#[macro_export]
macro_rules! unit {
    ($raw:expr) => {{
        const UNIT: $crate::addressing::Unit = match $crate::addressing::Unit::checked($raw) {
            Some(unit) => unit,
            None => panic!("Unit must be 0-15"),
        };
        UNIT
    }};
}

/// Creates a [`ControllerId`](crate::addressing::ControllerId) from a literal.
///
/// # Examples
///
/// ```
/// use nexa_pico::controller_id;
///
/// let id = controller_id!(1_234_567);
/// assert_eq!(id.raw(), 1_234_567);
/// ```
///
/// ```compile_fail
/// // Controller ids are 26 bits
/// let id = nexa_pico::controller_id!(0x400_0000);
/// ```
#[macro_export]
macro_rules! controller_id {
    ($raw:expr) => {{
        const ID: $crate::addressing::ControllerId =
            match $crate::addressing::ControllerId::checked($raw) {
                Some(id) => id,
                None => panic!("Controller id must fit in 26 bits"),
            };
        ID
    }};
}
