use crate::grammar::Platform;

/// Normalizes a server-reported type name into the name that appears in
/// source files.
pub fn parse_type_name(type_name: &str, platform: Platform) -> String {
    match platform {
        Platform::Ios => parse_ios_type_name(type_name),
        Platform::Android => parse_android_type_name(type_name),
    }
}

/// Drops the compiled module prefix: source files never contain it, so
/// `MyModule.MyClass` becomes `MyClass` while `MyModule.Outer.Inner` keeps
/// its nesting as `Outer.Inner`.
fn parse_ios_type_name(type_name: &str) -> String {
    match type_name.split_once('.') {
        Some((_, rest)) => rest.to_string(),
        None => type_name.to_string(),
    }
}

/// Rewrites `com.example.Foo$Bar (File.kt)` to `Foo.Bar`.
///
/// A trailing file annotation goes first. Dots separate package segments,
/// which never appear in source declarations, so they are dropped; `$`
/// separates class nesting, which becomes the dotted qualified name.
fn parse_android_type_name(type_name: &str) -> String {
    let name = type_name.split('(').next().unwrap_or(type_name).trim();
    match name.split_once('$') {
        Some((qualified_outer, nested)) => {
            let outer = qualified_outer.rsplit('.').next().unwrap_or(qualified_outer);
            format!("{}.{}", outer, nested.replace('$', "."))
        }
        None => name.rsplit('.').next().unwrap_or(name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ios_drops_module_prefix() {
        assert_eq!(parse_type_name("MyModule.MyClass", Platform::Ios), "MyClass");
        assert_eq!(parse_type_name("MyModule.Outer.Inner", Platform::Ios), "Outer.Inner");
    }

    #[test]
    fn test_ios_bare_name_is_unchanged() {
        assert_eq!(parse_type_name("MyClass", Platform::Ios), "MyClass");
    }

    #[test]
    fn test_android_rewrites_nested_class_report() {
        assert_eq!(
            parse_type_name("com.example.Foo$Bar (File.kt)", Platform::Android),
            "Foo.Bar"
        );
    }

    #[test]
    fn test_android_strips_package_path() {
        assert_eq!(parse_type_name("com.example.app.Foo", Platform::Android), "Foo");
        assert_eq!(parse_type_name("Foo", Platform::Android), "Foo");
    }

    #[test]
    fn test_android_deeply_nested_classes() {
        assert_eq!(
            parse_type_name("com.example.Outer$Inner$Deepest", Platform::Android),
            "Outer.Inner.Deepest"
        );
    }
}
