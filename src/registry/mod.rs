//! Library registry inspector
//!
//! External libraries cannot be introspected at runtime the way the zoo's
//! own wrapper files are parsed, so their constructor signatures are
//! registered here as structured metadata: a tree of `LibraryModule`s
//! holding `ClassSpec`s built with a builder API (see `manifests`). The
//! inspector walks a registered tree the way the original reflection pass
//! walked package namespaces: recursively through sub-modules, bounded to
//! the root namespace so re-exported foreign classes never leak in, with an
//! optional allow-list restricting which classes a category exposes.

pub mod hints;
pub mod manifests;

use tracing::{debug, warn};

use crate::schema::{ClassSchemaMap, ExtractError, ExtractedSource, SchemaSource};

pub use hints::{extract_params, format_type, Param, TypeHint};

/// One registered class: its constructor parameter list plus the module
/// path it is actually defined in (when that differs from where it is
/// registered, i.e. a re-export).
#[derive(Debug, Clone)]
pub struct ClassSpec {
    pub name: String,
    defined_in: Option<String>,
    init: Option<Vec<Param>>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defined_in: None,
            init: Some(Vec::new()),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.init.get_or_insert_with(Vec::new).push(param);
        self
    }

    /// Mark the class as defined in another module (a re-export).
    pub fn defined_in(mut self, module_path: impl Into<String>) -> Self {
        self.defined_in = Some(module_path.into());
        self
    }

    /// Mark the class as having no inspectable constructor.
    pub fn without_init(mut self) -> Self {
        self.init = None;
        self
    }
}

/// A registered library module: classes plus sub-modules.
#[derive(Debug, Clone)]
pub struct LibraryModule {
    path: String,
    classes: Vec<ClassSpec>,
    submodules: Vec<LibraryModule>,
}

impl LibraryModule {
    /// `path` is the dotted module path, e.g. `"torch.optim.lr_scheduler"`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            classes: Vec::new(),
            submodules: Vec::new(),
        }
    }

    pub fn class(mut self, class: ClassSpec) -> Self {
        self.classes.push(class);
        self
    }

    pub fn submodule(mut self, module: LibraryModule) -> Self {
        self.submodules.push(module);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The catalog qualifier for this module, `>`-joined.
    pub fn qualifier(&self) -> String {
        self.path.replace('.', ">")
    }
}

/// `SchemaSource` over one registered library module tree.
pub struct RegistrySource {
    module: LibraryModule,
    allow: Option<Vec<String>>,
}

impl RegistrySource {
    pub fn new(module: LibraryModule) -> Self {
        Self {
            module,
            allow: None,
        }
    }

    /// Restrict extraction to the named classes.
    pub fn restricted(module: LibraryModule, class_names: &[&str]) -> Self {
        Self {
            module,
            allow: Some(class_names.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn qualifier(&self) -> String {
        self.module.qualifier()
    }

    fn collect(&self, module: &LibraryModule, root_namespace: &str, out: &mut ClassSchemaMap) {
        for class in &module.classes {
            if class.name.starts_with('_') {
                continue;
            }
            if let Some(allow) = &self.allow {
                if !allow.iter().any(|n| n == &class.name) {
                    continue;
                }
            }
            if let Some(defined_in) = &class.defined_in {
                if !defined_in.starts_with(root_namespace) {
                    debug!(
                        class = %class.name,
                        defined_in = %defined_in,
                        namespace = %root_namespace,
                        "skipping re-exported class outside the target namespace"
                    );
                    continue;
                }
            }

            let Some(params) = &class.init else {
                debug!(class = %class.name, "no constructor registered, skipping");
                continue;
            };
            let entry = extract_params(params);
            if entry.is_empty() {
                warn!(class = %class.name, module = %module.path, "no parameters found for constructor");
            }
            out.insert(class.name.clone(), entry);
        }

        for sub in &module.submodules {
            if sub.path.starts_with(root_namespace) {
                self.collect(sub, root_namespace, out);
            } else {
                debug!(submodule = %sub.path, namespace = %root_namespace, "skipping out-of-namespace submodule");
            }
        }
    }
}

impl SchemaSource for RegistrySource {
    fn describe(&self) -> String {
        format!("library registry {}", self.module.path)
    }

    fn extract(&self) -> Result<Vec<ExtractedSource>, ExtractError> {
        let mut classes = ClassSchemaMap::new();
        self.collect(&self.module, &self.module.path, &mut classes);
        Ok(vec![ExtractedSource {
            key: self.qualifier(),
            classes,
            tags: Vec::new(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LiteralValue;

    fn fixture_module() -> LibraryModule {
        LibraryModule::new("lib.sub")
            .class(
                ClassSpec::new("Foo")
                    .param(Param::new("alpha").hint(TypeHint::float()).default_value(LiteralValue::Float(1.0)))
                    .param(Param::new("beta").default_value(LiteralValue::Int(0))),
            )
            .class(ClassSpec::new("Bare"))
            .class(ClassSpec::new("_Private").param(Param::new("x")))
            .class(
                ClassSpec::new("Foreign")
                    .defined_in("other.lib")
                    .param(Param::new("y")),
            )
            .class(ClassSpec::new("NoCtor").without_init())
            .submodule(
                LibraryModule::new("lib.sub.deep")
                    .class(ClassSpec::new("Deep").param(Param::new("z").hint(TypeHint::int()))),
            )
    }

    fn extract(source: &RegistrySource) -> ClassSchemaMap {
        source.extract().unwrap().remove(0).classes
    }

    #[test]
    fn test_qualifier_is_angle_joined() {
        assert_eq!(fixture_module().qualifier(), "lib>sub");
    }

    #[test]
    fn test_reference_scenario() {
        // Foo(alpha: float = 1.0, beta=0)
        let classes = extract(&RegistrySource::new(fixture_module()));
        let foo = &classes["Foo"];
        assert_eq!(foo["alpha"].type_desc, Some(LiteralValue::type_ref("float")));
        assert_eq!(foo["alpha"].default, Some(LiteralValue::Float(1.0)));
        assert_eq!(
            foo["beta"].type_desc,
            Some(LiteralValue::type_ref("int, float"))
        );
        assert_eq!(foo["beta"].default, Some(LiteralValue::Int(0)));
    }

    #[test]
    fn test_private_and_foreign_classes_skipped() {
        let classes = extract(&RegistrySource::new(fixture_module()));
        assert!(!classes.contains_key("_Private"));
        assert!(!classes.contains_key("Foreign"));
        assert!(!classes.contains_key("NoCtor"));
    }

    #[test]
    fn test_zero_parameter_class_kept_as_empty_entry() {
        let classes = extract(&RegistrySource::new(fixture_module()));
        let bare = classes.get("Bare").expect("empty entry must be present");
        assert!(bare.is_empty());
    }

    #[test]
    fn test_submodules_walked_recursively() {
        let classes = extract(&RegistrySource::new(fixture_module()));
        assert!(classes.contains_key("Deep"));
    }

    #[test]
    fn test_out_of_namespace_submodule_skipped() {
        let module = LibraryModule::new("lib.sub")
            .submodule(LibraryModule::new("vendored.dep").class(ClassSpec::new("Leak")));
        let classes = extract(&RegistrySource::new(module));
        assert!(!classes.contains_key("Leak"));
    }

    #[test]
    fn test_allow_list_restricts() {
        let source = RegistrySource::restricted(fixture_module(), &["Foo"]);
        let classes = extract(&source);
        assert!(classes.contains_key("Foo"));
        assert!(!classes.contains_key("Bare"));
        assert!(!classes.contains_key("Deep"));
    }

    #[test]
    fn test_optimizer_param_omitted_end_to_end() {
        let module = LibraryModule::new("torch.optim.lr_scheduler").class(
            ClassSpec::new("StepLR")
                .param(Param::new("optimizer"))
                .param(Param::new("step_size").hint(TypeHint::int()))
                .param(
                    Param::new("gamma")
                        .hint(TypeHint::float())
                        .default_value(LiteralValue::Float(0.1)),
                ),
        );
        let classes = extract(&RegistrySource::new(module));
        let step_lr = &classes["StepLR"];
        assert!(!step_lr.contains_key("optimizer"));
        assert_eq!(step_lr.len(), 2);
    }
}
