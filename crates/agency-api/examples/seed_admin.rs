//! 生成首个管理员账号的 SQL
//!
//! 管理员账号只能由已登录的管理员创建，首个账号需要直接写入数据库。
//!
//! 运行: cargo run -p agency-api --example seed_admin -- <username> <password>

use agency_api::auth::{Role, hash_password, validate_password_strength};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("Usage: seed_admin <username> <password>");
        std::process::exit(2);
    };

    if let Err(e) = validate_password_strength(&password) {
        anyhow::bail!("password rejected: {}", e);
    }

    let hash = hash_password(&password)?;

    println!(
        "INSERT INTO users (full_name, preferred_name, contact_number, email_address, username, password_hash, role)\n\
         VALUES ('{0}', '{0}', '-', '{0}@localhost', '{0}', '{1}', '{2}');",
        username.replace('\'', "''"),
        hash,
        Role::Admin.as_str()
    );

    Ok(())
}
