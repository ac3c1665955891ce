//! Server command handlers.

use serde::Serialize;
use tabled::Tabled;

use scom_core::{Applied, Host, Order, Resource, ServerSpec, ServerState, Session};

use crate::cli::{GlobalOpts, ServersArgs, ServersCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Public IP")]
    public_ip: String,
    #[tabled(rename = "Release")]
    release: String,
}

impl From<&Host> for HostRow {
    fn from(h: &Host) -> Self {
        Self {
            id: h.id,
            hostname: h.title.clone(),
            location: h.location.name.clone(),
            public_ip: h
                .public_network()
                .map(|n| n.host_ip.clone())
                .unwrap_or_default(),
            release: h.scheduled_release_at.as_str().unwrap_or_default().into(),
        }
    }
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Hostnames")]
    hostnames: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id,
            status: if o.is_cancelled() {
                "cancelled".into()
            } else {
                o.status.to_string()
            },
            hostnames: o.description.join(", "),
            total: format!("{:.2} {}", o.amount_total, o.currency),
            created: o.created_time.clone(),
        }
    }
}

fn detail(h: &Host) -> String {
    let mut lines = vec![
        format!("ID:        {}", h.id),
        format!("Hostname:  {}", h.title),
        format!("Location:  {} ({})", h.location.name, h.location.id),
        format!("Config:    {}", if h.conf.is_empty() { "-" } else { h.conf.as_str() }),
        format!("Release:   {}", h.scheduled_release_at.as_str().unwrap_or("-")),
        format!("Lease end: {}", h.lease_end.as_str().unwrap_or("-")),
    ];
    for net in &h.networks {
        lines.push(format!(
            "Network:   {} {}/{} ({})",
            net.pool_type, net.host_ip, net.size, net.netmask
        ));
    }
    lines.join("\n")
}

fn applied_detail(a: &Applied<ServerState>) -> String {
    format!("Hostname:  {}", a.state.hostname)
}

#[derive(Serialize)]
struct InUse<'a> {
    hostname: &'a str,
    in_use: bool,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Resolve a `--config` value: literal JSON, or `@path` to read a file.
fn read_template(raw: &str) -> Result<String, CliError> {
    match raw.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(raw.to_owned()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: ServersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let servers = session.servers();

    match args.command {
        ServersCommand::List => {
            let hosts = servers.list_servers().await?;
            let out = output::render_list(&global.output, &hosts, |h| HostRow::from(h), |h| {
                h.title.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Pending => {
            let hosts = servers.list_pending_servers().await?;
            let out = output::render_list(&global.output, &hosts, |h| HostRow::from(h), |h| {
                h.title.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Orders => {
            let orders = servers.list_orders().await?;
            let out = output::render_list(&global.output, &orders, |o| OrderRow::from(o), |o| {
                o.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Show { hostname } => {
            let host = servers
                .find_server_by_hostname(&hostname)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "server".into(),
                    identifier: hostname.clone(),
                    list_command: "servers list".into(),
                })?;
            let out = output::render_single(&global.output, &host, detail, |h| h.title.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::InUse { hostname } => {
            let in_use = servers.hostname_in_use(&hostname).await?;
            let report = InUse {
                hostname: &hostname,
                in_use,
            };
            let out = output::render_single(
                &global.output,
                &report,
                |r| {
                    if r.in_use {
                        format!("{} is in use", r.hostname)
                    } else {
                        format!("{} is free", r.hostname)
                    }
                },
                |r| r.in_use.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Create { hostname, config } => {
            let spec = ServerSpec {
                hostname,
                config: read_template(&config)?,
            };
            let applied = servers.create(&spec).await?;
            output::print_status(&format!("Ordered {}", applied.id), global.quiet);
            let out =
                output::render_single(&global.output, &applied, applied_detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Rename { old, new, config } => {
            let template = read_template(&config)?;
            let prior = ServerSpec {
                hostname: old.clone(),
                config: template.clone(),
            };
            let spec = ServerSpec {
                hostname: new,
                config: template,
            };
            let applied = servers.update(&old, Some(&prior), &spec).await?;
            output::print_status(
                &format!("Released {old}, ordered {}", applied.id),
                global.quiet,
            );
            let out =
                output::render_single(&global.output, &applied, applied_detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Release { hostname } => {
            servers.release(&hostname).await?;
            output::print_status(
                &format!("Release of {hostname} scheduled"),
                global.quiet,
            );
            Ok(())
        }
    }
}
