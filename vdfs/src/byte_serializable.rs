/// Fixed-width binary encoding for the persisted records. `to_bytes` and
/// `from_bytes` must be bit-exact inverses of each other.
pub trait ByteSerializable {
    type BytesArrayType;

    fn to_bytes(&self) -> Self::BytesArrayType;
    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized;
}
