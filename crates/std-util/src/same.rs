/// Asserts that two shared handles point to the same instance, using their
/// `ptr_eq` method.
#[macro_export]
macro_rules! assert_same {
    ($a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => {
                if !a.ptr_eq(b) {
                    panic!(
                        "expected `{}` and `{}` to be the same instance",
                        stringify!($a),
                        stringify!($b)
                    );
                }
            }
        }
    };
}

/// Asserts that two shared handles point to different instances.
#[macro_export]
macro_rules! assert_not_same {
    ($a:expr, $b:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => {
                if a.ptr_eq(b) {
                    panic!(
                        "expected `{}` and `{}` to be different instances",
                        stringify!($a),
                        stringify!($b)
                    );
                }
            }
        }
    };
}
