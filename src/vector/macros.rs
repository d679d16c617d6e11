//! Macro for Vector

/// Vector initialization macros.
///
/// ```rust
/// use bucket_collections::vector;
///
/// let v = vector![1; 4].unwrap();
/// assert_eq!(v.as_slice(), &[1, 1, 1, 1]);
///
/// let v = vector![1, 2, 3, 4, 5].unwrap();
/// assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
/// assert_eq!(v.capacity(), 8);
/// ```
#[macro_export]
macro_rules! vector {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$($crate::vector!(@single $rest)),*]));

    ($item:expr; $count:expr) => {{
        let init = || -> Result<_, $crate::Error> {
            let mut v = $crate::Vector::new()?;
            v.resize($count, $item)?;
            Ok(v)
        };
        init()
    }};
    ($($x:expr),* $(,)?) => {{
        let init = || -> Result<_, $crate::Error> {
            let cnt = $crate::vector!(@count $($x),*);
            let mut v = $crate::Vector::new()?;
            v.try_reserve(cnt)?;
            $(
                v.push($x)?;
            )*
            Ok(v)
        };
        init()
    }};
}
