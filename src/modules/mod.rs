pub mod books;
pub mod workers;

use handyhub_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(books::create_module());
    registry.register(workers::create_module());
}
