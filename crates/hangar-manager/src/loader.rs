//! Host-side module loading seam.
//!
//! The manager validates, indexes and removes packages; actually loading a
//! package's payload into a running host is runtime-specific and stays
//! outside this crate. Hosts implement [`ModuleLoader`] for their module
//! representation and pass it to
//! [`PackageManager::load_with`](crate::PackageManager::load_with), which
//! only ever hands the loader an indexed, validated package.

use hangar_core::Outcome;
use hangar_store::Package;

/// Capability for loading a validated package's payload into the host.
pub trait ModuleLoader {
    /// The host's representation of a loaded module.
    type Module;

    /// Loads the payload of `package`.
    ///
    /// Implementations report load problems through the returned Outcome;
    /// they must not panic on bad payload bytes.
    fn load(&self, package: &Package) -> Outcome<Self::Module>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_archive::Manifest;
    use hangar_core::PluginKind;

    struct NameLoader;

    impl ModuleLoader for NameLoader {
        type Module = String;

        fn load(&self, package: &Package) -> Outcome<String> {
            Outcome::success(package.fqn().as_str().to_string())
        }
    }

    #[test]
    fn loaders_receive_the_package_and_choose_the_module_type() {
        let manifest = Manifest::new("App", "example.app.demo", "1.0.0", PluginKind::App);
        let package = Package::new(manifest, "/store/example.app.demo.1.0.0.hpk");

        let loaded = NameLoader.load(&package);
        assert_eq!(loaded.into_value().as_deref(), Some("example.app.demo"));
    }
}
