use std::collections::HashMap;

use super::models::{Effect, PermissionDescriptor, PermissionRecord, PluginRecord, PolicyRecord};

/// 静态目录存储 / Static catalog store
///
/// 进程启动时播种一次，之后只读；通过 `web::Data` 注入处理器
/// Seeded once at process start, read-only afterwards; injected into
/// handlers as `web::Data`.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    policies: Vec<PolicyRecord>,
    plugins: Vec<PluginRecord>,
    permissions: Vec<PermissionRecord>,
}

impl CatalogStore {
    /// 构建种子目录 / build the seed catalog
    pub fn seed() -> Self {
        Self {
            policies: seed_policies(),
            plugins: seed_plugins(),
            permissions: seed_permissions(),
        }
    }

    pub fn policies(&self) -> &[PolicyRecord] {
        &self.policies
    }

    pub fn plugins(&self) -> &[PluginRecord] {
        &self.plugins
    }

    pub fn permissions(&self) -> &[PermissionRecord] {
        &self.permissions
    }
}

fn csv_metadata() -> Option<HashMap<String, String>> {
    Some(HashMap::from([(
        "source".to_string(),
        "csv-file".to_string(),
    )]))
}

fn policy(
    id: &str,
    entity_reference: &str,
    action: &str,
    metadata: Option<HashMap<String, String>>,
) -> PolicyRecord {
    PolicyRecord {
        id: id.to_string(),
        entity_reference: entity_reference.to_string(),
        permission: "catalog-entity".to_string(),
        policy: action.to_string(),
        effect: Effect::Allow,
        metadata,
    }
}

fn seed_policies() -> Vec<PolicyRecord> {
    vec![
        // id "1" 保留无 metadata 的形态 / id "1" deliberately has no metadata
        policy("1", "user:default/admin", "read", None),
        policy("2", "role:default/admin", "create", csv_metadata()),
        policy("3", "role:default/admin", "update", csv_metadata()),
        policy("4", "role:default/admin", "delete", csv_metadata()),
        policy("5", "role:default/user", "read", csv_metadata()),
    ]
}

fn seed_plugins() -> Vec<PluginRecord> {
    vec![
        PluginRecord {
            name: "catalog".to_string(),
            display_name: "Catalog".to_string(),
            permissions: vec![PermissionDescriptor {
                name: "catalog-entity".to_string(),
                display_name: "Catalog Entity".to_string(),
                resource_type: "catalog-entity".to_string(),
                actions: vec![
                    "create".to_string(),
                    "read".to_string(),
                    "update".to_string(),
                    "delete".to_string(),
                ],
            }],
        },
        PluginRecord {
            name: "scaffolder".to_string(),
            display_name: "Scaffolder".to_string(),
            permissions: vec![PermissionDescriptor {
                name: "scaffolder-action".to_string(),
                display_name: "Scaffolder Action".to_string(),
                resource_type: "scaffolder-template".to_string(),
                actions: vec!["use".to_string(), "read".to_string()],
            }],
        },
        PluginRecord {
            name: "techdocs".to_string(),
            display_name: "TechDocs".to_string(),
            permissions: vec![PermissionDescriptor {
                name: "techdocs-document".to_string(),
                display_name: "TechDocs Document".to_string(),
                resource_type: "techdocs-document".to_string(),
                actions: vec!["read".to_string()],
            }],
        },
    ]
}

fn seed_permissions() -> Vec<PermissionRecord> {
    vec![
        PermissionRecord {
            plugin_id: "catalog".to_string(),
            name: "catalog-entity".to_string(),
            display_name: "Catalog Entity".to_string(),
            resource_type: "catalog-entity".to_string(),
            policies: vec![
                "create".to_string(),
                "read".to_string(),
                "update".to_string(),
                "delete".to_string(),
            ],
        },
        PermissionRecord {
            plugin_id: "scaffolder".to_string(),
            name: "scaffolder-action".to_string(),
            display_name: "Scaffolder Action".to_string(),
            resource_type: "scaffolder-template".to_string(),
            policies: vec!["use".to_string(), "read".to_string()],
        },
        PermissionRecord {
            plugin_id: "techdocs".to_string(),
            name: "techdocs-document".to_string(),
            display_name: "TechDocs Document".to_string(),
            resource_type: "techdocs-document".to_string(),
            policies: vec!["read".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_sizes() {
        let catalog = CatalogStore::seed();
        assert_eq!(catalog.policies().len(), 5);
        assert_eq!(catalog.plugins().len(), 3);
        assert_eq!(catalog.permissions().len(), 3);
    }

    #[test]
    fn test_policy_ids_are_unique() {
        let catalog = CatalogStore::seed();
        let ids: HashSet<&str> = catalog.policies().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.policies().len());
    }

    #[test]
    fn test_policy_one_matches_documented_scenario() {
        let catalog = CatalogStore::seed();
        let first = catalog
            .policies()
            .iter()
            .find(|p| p.id == "1")
            .expect("policy id 1 must be seeded");
        assert_eq!(first.entity_reference, "user:default/admin");
        assert_eq!(first.policy, "read");
        assert_eq!(first.effect, Effect::Allow);
        assert!(first.metadata.is_none());
    }

    #[test]
    fn test_every_plugin_has_a_permission_record() {
        let catalog = CatalogStore::seed();
        for plugin in catalog.plugins() {
            assert!(
                catalog
                    .permissions()
                    .iter()
                    .any(|perm| perm.plugin_id == plugin.name),
                "plugin {} missing from permissions view",
                plugin.name
            );
        }
    }
}
