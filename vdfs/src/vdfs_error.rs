use alloc::string::String;
use core::fmt::{Debug, Display};

macro_rules! enum_variant_stringify {
    ($self:expr, [$($var:ident),+]) => {
        match $self {
            $(
               $var => stringify!($var),
            )+
            _ => "",
        }
    }
}

pub trait VdfsErrorConvertible: Debug {
    /// If this is an internal error this will succeed otherwise by default it will return None.
    fn into_vdfs_error(self) -> VdfsError<Self>
    where
        Self: Sized,
    {
        return VdfsError::DiskError(self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VdfsError<E> {
    InvalidBlockSize,
    NameTooLong,
    NoFreeInode,
    FileTooLarge,
    InsufficientSpace,
    FileNotFound(String),
    Cancelled,
    CorruptedSuperBlock,
    CorruptedInode,
    BlockIndexOutOfRange,
    ShortRead,
    ShortWrite,
    DiskError(E),
}

impl<E: Display> core::fmt::Display for VdfsError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use VdfsError::*;

        match self {
            DiskError(e) => write!(f, "Disk error: {}", e),
            FileNotFound(name) => write!(f, "No file with name: {}", name),
            _ => write!(
                f,
                "{}",
                enum_variant_stringify!(
                    self,
                    [
                        InvalidBlockSize,
                        NameTooLong,
                        NoFreeInode,
                        FileTooLarge,
                        InsufficientSpace,
                        Cancelled,
                        CorruptedSuperBlock,
                        CorruptedInode,
                        BlockIndexOutOfRange,
                        ShortRead,
                        ShortWrite
                    ]
                )
            ),
        }
    }
}
