//! Shared projects, runtimes and console transcripts.

use std::sync::Arc;

use typetrack::extract::{ProjectContext, RecordedConsole, RuntimeHandle};
use typetrack::model::{ClassDescriptor, LibraryOrigin, Location, MethodDescriptor, Visibility};

/// Declaration dump of a small Rails-style project.
pub const SHOP_DECLARATIONS: &str = "\
module Auditable
module Searchable
class ApplicationRecord ActiveRecord::Base
include ApplicationRecord Auditable
class User ApplicationRecord
include User Searchable
class Admin User
";

pub fn shop_project(root: impl Into<std::path::PathBuf>) -> ProjectContext {
    ProjectContext::new("shop", root)
}

pub fn ruby() -> RuntimeHandle {
    RuntimeHandle::new("/usr/bin/ruby", "2.4.2")
}

pub fn shop_console() -> Arc<RecordedConsole> {
    Arc::new(RecordedConsole::new(SHOP_DECLARATIONS))
}

pub fn method(owner: &str, name: &str, visibility: Visibility) -> MethodDescriptor {
    MethodDescriptor::new(ClassDescriptor::local(owner), name, visibility, None)
}

pub fn gem_method(owner: &str, name: &str, gem: &str, version: &str) -> MethodDescriptor {
    MethodDescriptor::new(
        ClassDescriptor::new(owner, Some(LibraryOrigin::new(gem, version))),
        name,
        Visibility::Public,
        Some(Location::new(format!("gems/{gem}/lib/{name}.rb"), 1)),
    )
}

/// Members declared across the shop hierarchy.
pub fn shop_methods() -> Vec<MethodDescriptor> {
    vec![
        gem_method("ActiveRecord::Base", "save", "activerecord", "5.0.0"),
        gem_method("ActiveRecord::Base", "to_s", "activerecord", "5.0.0"),
        method("Auditable", "audit_log", Visibility::Public),
        method("Searchable", "search", Visibility::Public),
        method("User", "to_s", Visibility::Public),
        method("User", "password_digest", Visibility::Private),
        method("Admin", "grant", Visibility::Protected),
        method("Kernel", "puts", Visibility::Private),
    ]
}
