use std::time::Duration;

// 注册往返探测：注册一个固定的测试用户，然后拉取用户列表
// Registration round-trip probe: register a fixed test user, then fetch
// the user list.

const PORT: u16 = 7007;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    println!("Testing user registration...");
    let register_url = format!("http://localhost:{}/api/rbac/users/register", PORT);
    let payload = serde_json::json!({
        "username": "testuser1",
        "email": "testuser1@example.com",
        "role": "user",
    });

    match client.post(&register_url).json(&payload).send().await {
        Ok(resp) => {
            println!("Status Code: {}", resp.status().as_u16());
            println!("Response: {}", resp.text().await.unwrap_or_default());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    }

    println!("\nTesting get users...");
    let users_url = format!("http://localhost:{}/api/rbac/users", PORT);
    match client.get(&users_url).send().await {
        Ok(resp) => {
            println!("Status Code: {}", resp.status().as_u16());
            println!("Response: {}", resp.text().await.unwrap_or_default());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
