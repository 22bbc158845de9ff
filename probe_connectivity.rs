use std::time::Duration;

// 连通性探测：对常见端口上的目录端点各发一次请求并打印结果，
// 单个端点失败不会中断整轮探测
// Connectivity probe: one request per endpoint across the usual ports,
// a failed endpoint never aborts the run.

const ENDPOINTS: [&str; 4] = [
    "http://localhost:8080/api/rbac/health",
    "http://localhost:8080/api/rbac/policies",
    "http://localhost:7007/api/rbac/policies",
    "http://localhost:3000/api/rbac/policies",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing connectivity to RBAC endpoints...\n");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    for url in ENDPOINTS {
        println!("Testing: {}", url);
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                println!("  Status: {}", status);
                println!("  Data: {}", preview);
            }
            Err(e) if e.is_timeout() => {
                println!("  Error: Timeout");
            }
            Err(e) => {
                println!("  Error: {}", e);
            }
        }
        println!();
    }

    println!("Connectivity tests completed.");
    Ok(())
}
