//! Canonical name derivation
//!
//! Every view is published under three hierarchical names:
//!
//! ```text
//! <tenant>/<app-name>/<module-name>/<component-name>!<contract>
//! <app-name>/<module-name>/<component-name>!<contract>
//! <module-name>/<component-name>!<contract>
//! ```
//!
//! The application segment appears only when the owning deployment is a
//! multi-module archive. When a component exposes exactly one view in
//! total, the same three names without the `!<contract>` qualifier are
//! published as well.

use crate::view::View;
use arbor_types::{ComponentDescriptor, ContractName};
use serde::{Deserialize, Serialize};

/// Tenant segment used when none is configured.
pub const DEFAULT_TENANT: &str = "global";

/// The three canonical names of one published view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNames {
    /// Tenant-wide path, tenant segment included.
    pub global: String,
    /// Application-scoped path.
    pub app: String,
    /// Module-scoped path.
    pub module: String,
}

impl ViewNames {
    /// Names in publish order. Unbinding walks this in reverse.
    pub fn in_bind_order(&self) -> [&str; 3] {
        [&self.global, &self.app, &self.module]
    }
}

/// Derives canonical names for views. Pure string composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDeriver {
    tenant: String,
}

impl NameDeriver {
    pub fn new(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
        }
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// The qualified names of a view.
    pub fn view_names(&self, view: &View) -> ViewNames {
        self.names(view.component(), Some(view.qualifier()))
    }

    /// The unqualified alias names of a single-view component.
    pub fn alias_names(&self, component: &ComponentDescriptor) -> ViewNames {
        self.names(component, None)
    }

    /// Derive all three names for a component and an optional qualifier.
    pub fn names(&self, component: &ComponentDescriptor, qualifier: Option<&ContractName>) -> ViewNames {
        let module = match qualifier {
            Some(contract) => format!("{}!{}", component.name, contract),
            None => component.name.to_string(),
        };
        let app = format!("{}/{}", component.module, module);
        // The application segment only applies to multi-module archives.
        let scoped = match &component.application {
            Some(application) if application.multi_module_archive => {
                format!("{}/{}", application.name, app)
            }
            _ => app.clone(),
        };
        let global = format!("{}/{}", self.tenant, scoped);
        ViewNames { global, app, module }
    }
}

impl Default for NameDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_TENANT)
    }
}
