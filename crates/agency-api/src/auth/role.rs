//! 角色与角色集合
//!
//! 每个登录身份恰好对应一个角色；路由声明一个允许的角色集合。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 用户角色，序列化为 "Admin" / "Client" / "Influencer"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Client,
    Influencer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Client, Role::Influencer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Client => "Client",
            Self::Influencer => "Influencer",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Admin => 0b001,
            Self::Client => 0b010,
            Self::Influencer => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未识别的角色字符串
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知角色: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// 严格匹配，大小写敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Client" => Ok(Self::Client),
            "Influencer" => Ok(Self::Influencer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 允许访问的角色集合
///
/// 空集合不允许任何角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const ADMIN: RoleSet = RoleSet::EMPTY.with(Role::Admin);
    pub const CLIENT: RoleSet = RoleSet::EMPTY.with(Role::Client);
    pub const INFLUENCER: RoleSet = RoleSet::EMPTY.with(Role::Influencer);
    pub const ADMIN_CLIENT: RoleSet = RoleSet::ADMIN.with(Role::Client);
    pub const ADMIN_INFLUENCER: RoleSet = RoleSet::ADMIN.with(Role::Influencer);
    pub const ALL: RoleSet = RoleSet::ADMIN_CLIENT.with(Role::Influencer);

    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    pub const fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 集合中的角色，按 Admin、Client、Influencer 顺序
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.roles().map(|r| r.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
