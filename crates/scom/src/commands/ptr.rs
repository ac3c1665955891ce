//! PTR record command handlers.

use tabled::Tabled;

use scom_core::{Applied, PtrRecord, PtrSpec, PtrState, Resource, Session};

use crate::cli::{GlobalOpts, PtrArgs, PtrCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PtrRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Domain")]
    domain_id: u64,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "PTR")]
    ptr: String,
    #[tabled(rename = "TTL")]
    ttl: u32,
}

impl From<&PtrRecord> for PtrRow {
    fn from(r: &PtrRecord) -> Self {
        Self {
            id: r.id,
            domain_id: r.domain_id,
            address: r.name.clone(),
            ptr: r.data.as_str().unwrap_or_default().into(),
            ttl: r.ttl,
        }
    }
}

fn detail(r: &PtrRecord) -> String {
    [
        format!("ID:       {}", r.id),
        format!("Domain:   {}", r.domain_id),
        format!("Type:     {}", r.record_type),
        format!("Address:  {}", r.name),
        format!("PTR:      {}", r.data.as_str().unwrap_or("-")),
        format!("TTL:      {}", r.ttl),
        format!("Disabled: {}", r.disabled),
    ]
    .join("\n")
}

fn applied_detail(a: &Applied<PtrState>) -> String {
    [
        format!("ID:       {}", a.id),
        format!("Hostname: {}", a.state.hostname),
        format!("Address:  {}", a.state.address),
        format!("PTR:      {}", a.state.ptr),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: PtrArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let records = session.ptr_records();

    match args.command {
        PtrCommand::List => {
            let list = records.list_records().await?;
            let out = output::render_list(&global.output, &list, |r| PtrRow::from(r), |r| {
                r.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PtrCommand::Show { id } => {
            let record = records.get_record(id).await?;
            let out = output::render_single(&global.output, &record, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PtrCommand::Create { hostname, ptr } => {
            let applied = records.create(&PtrSpec { hostname, ptr }).await?;
            output::print_status(&format!("Created PTR record {}", applied.id), global.quiet);
            let out =
                output::render_single(&global.output, &applied, applied_detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PtrCommand::Update { id, hostname, ptr } => {
            let spec = PtrSpec { hostname, ptr };
            let applied = records.update(&id.to_string(), None, &spec).await?;
            output::print_status(
                &format!("Replaced PTR record {id} with {}", applied.id),
                global.quiet,
            );
            let out =
                output::render_single(&global.output, &applied, applied_detail, |a| a.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PtrCommand::Delete { id } => {
            records.remove(id).await?;
            output::print_status(&format!("Deleted PTR record {id}"), global.quiet);
            Ok(())
        }
    }
}
