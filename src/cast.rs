pub trait CastFrom<T: Sized>: Sized {
    fn cast_from(from: T) -> Self;
}

pub trait Cast: Sized {
    #[inline]
    fn cast<T>(self) -> T
    where
        T: Sized + CastFrom<Self>,
    {
        CastFrom::cast_from(self)
    }
}

impl<T: Sized> Cast for T {}

impl<A, B, A1, B1> CastFrom<(A1, B1)> for (A, B)
where
    A: CastFrom<A1>,
    B: CastFrom<B1>,
{
    #[inline]
    fn cast_from((a, b): (A1, B1)) -> Self {
        (a.cast(), b.cast())
    }
}
