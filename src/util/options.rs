/// Map an optional flag to `1`/`0`, keeping `None`.
pub fn bool_to_int(value: Option<bool>) -> Option<i32> {
    value.map(i32::from)
}
