use std::time::Duration;

// 按端点逐个探测 RBAC API；其中 permission-policies 与 policy-metadata
// 服务器并未实现，预期得到 404
// Per-endpoint sweep of the RBAC API; permission-policies and
// policy-metadata are not implemented by the server, a 404 is the
// expected answer there.

const PORT: u16 = 7007;

const ENDPOINTS: [&str; 6] = [
    "/api/rbac/plugins",
    "/api/rbac/policies",
    "/api/rbac/permission-policies",
    "/api/rbac/permissions",
    "/api/rbac/policy-metadata",
    "/api/rbac/users",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing RBAC API endpoints...\n");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    for endpoint in ENDPOINTS {
        let url = format!("http://localhost:{}{}", PORT, endpoint);
        match client.get(&url).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                let preview: String = body.chars().take(100).collect();
                println!("✅ {}: {}", endpoint, status);
                println!("   Response: {}...", preview);
            }
            Err(e) if e.is_timeout() => {
                println!("❌ {}: Request timeout", endpoint);
            }
            Err(e) => {
                println!("❌ {}: {}", endpoint, e);
            }
        }
        println!();
    }

    Ok(())
}
