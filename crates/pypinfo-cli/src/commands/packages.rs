//! Package-level queries: `packages`, `releases`, `roles`, `user`.

use pypinfo_core::error::PypiResult;
use pypinfo_core::types::{PackageRole, UserPackage};

use super::CommandContext;

pub async fn list(count_only: bool, ctx: &CommandContext) -> PypiResult<()> {
    let packages = ctx.client.list_packages().await?;

    if count_only {
        return if ctx.output.is_json() {
            ctx.output.json(&packages.len())
        } else {
            ctx.output.data(&packages.len().to_string());
            Ok(())
        };
    }

    if ctx.output.is_json() {
        return ctx.output.json(&packages);
    }
    for name in &packages {
        ctx.output.data(name);
    }
    Ok(())
}

pub async fn releases(package: &str, hidden: bool, ctx: &CommandContext) -> PypiResult<()> {
    let versions = ctx.client.package_releases(package, hidden).await?;
    show_releases(package, &versions, ctx)
}

pub fn show_releases(package: &str, versions: &[String], ctx: &CommandContext) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(versions);
    }

    ctx.output.heading(&format!("Releases of {}", package));
    if versions.is_empty() {
        ctx.output.warn("No releases found");
    }
    for version in versions {
        ctx.output.data(version);
    }
    Ok(())
}

pub async fn roles(package: &str, ctx: &CommandContext) -> PypiResult<()> {
    let roles = ctx.client.package_roles(package).await?;
    show_roles(package, &roles, ctx)
}

pub fn show_roles(package: &str, roles: &[PackageRole], ctx: &CommandContext) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(roles);
    }

    ctx.output.heading(&format!("Roles on {}", package));
    for entry in roles {
        ctx.output.field(entry.role.as_str(), &entry.user);
    }
    Ok(())
}

pub async fn user(user: &str, ctx: &CommandContext) -> PypiResult<()> {
    let packages = ctx.client.user_packages(user).await?;
    show_user_packages(user, &packages, ctx)
}

pub fn show_user_packages(
    user: &str,
    packages: &[UserPackage],
    ctx: &CommandContext,
) -> PypiResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(packages);
    }

    ctx.output.heading(&format!("Packages of {}", user));
    for entry in packages {
        ctx.output.field(entry.role.as_str(), &entry.package);
    }
    Ok(())
}
