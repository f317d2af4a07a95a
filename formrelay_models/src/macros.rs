macro_rules! sensitive_debug {
    ($ident:ident) => {
        impl ::std::fmt::Debug for $ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(::core::concat!(::core::stringify!($ident), "(<sensitive>)"))
            }
        }
    };
}

pub(crate) use sensitive_debug;
