//! Helper traits for allocator trait bounds.
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, Scalar, U1};

/// An allocator for vectors and square matrices of a single small dimension.
pub trait SmallDimAllocator<T: Scalar, D: DimName>:
    Allocator<T, D> + Allocator<T, D, D> + Allocator<T, U1, D>
{
}

impl<T, D> SmallDimAllocator<T, D> for DefaultAllocator
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D> + Allocator<T, D, D> + Allocator<T, U1, D>,
{
}

/// An allocator for two dimensions and their products.
pub trait BiDimAllocator<T: Scalar, D1: DimName, D2: DimName>:
    SmallDimAllocator<T, D1> + SmallDimAllocator<T, D2> + Allocator<T, D1, D2> + Allocator<T, D2, D1>
{
}

impl<T: Scalar, D1: DimName, D2: DimName> BiDimAllocator<T, D1, D2> for DefaultAllocator where
    DefaultAllocator: SmallDimAllocator<T, D1>
        + SmallDimAllocator<T, D2>
        + Allocator<T, D1, D2>
        + Allocator<T, D2, D1>
{
}
