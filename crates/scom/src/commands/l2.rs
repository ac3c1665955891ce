//! L2 segment command handlers.

use tabled::Tabled;

use scom_core::{L2Segment, L2SegmentSpec, Resource, SegmentType, Session};

use crate::cli::{GlobalOpts, L2Args, L2Command, SegmentDecl};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    segment_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Hosts")]
    hosts: usize,
}

fn type_name(code: i64) -> String {
    SegmentType::from_code(code).map_or_else(|| code.to_string(), |t| t.to_string())
}

fn row(s: &L2Segment, color: bool) -> SegmentRow {
    SegmentRow {
        id: s.id,
        name: s.name.clone(),
        segment_type: type_name(s.segment_type),
        status: output::paint_status(&s.status, color),
        location: s.location_id().map(|l| l.to_string()).unwrap_or_default(),
        hosts: s.hosts.len(),
    }
}

fn detail(s: &L2Segment) -> String {
    let mut lines = vec![
        format!("ID:       {}", s.id),
        format!("Name:     {}", s.name),
        format!("Type:     {}", type_name(s.segment_type)),
        format!("Status:   {}", s.status),
        format!(
            "Location: {}",
            s.location_id().map_or_else(|| "-".into(), |l| l.to_string())
        ),
    ];
    for member in &s.hosts {
        lines.push(format!(
            "Host:     {} ({}, {}, vlan {})",
            member.title,
            member.id,
            member.mode,
            member.vlan.as_str().unwrap_or("-")
        ));
    }
    lines.join("\n")
}

fn spec_from(decl: SegmentDecl) -> L2SegmentSpec {
    L2SegmentSpec {
        name: decl.name,
        segment_type: decl.segment_type,
        hosts: decl.hosts,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: L2Args, global: &GlobalOpts) -> Result<(), CliError> {
    let segments = session.l2_segments();
    let color = output::should_color(&global.color);

    match args.command {
        L2Command::List => {
            let list = segments.list_segments().await?;
            let out = output::render_list(&global.output, &list, |s| row(s, color), |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        L2Command::Show { id } => {
            let segment = segments.get_segment(id).await?;
            let out =
                output::render_single(&global.output, &segment, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        L2Command::Create(decl) => {
            let spec = spec_from(decl);
            let applied = segments.create(&spec).await?;
            output::print_status(
                &format!("Created L2 segment {} ({})", applied.id, applied.state.status),
                global.quiet,
            );
            let out = output::render_single(
                &global.output,
                &applied,
                |a| format!("ID:       {}\nStatus:   {}", a.id, a.state.status),
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        L2Command::Update { id, decl } => {
            let spec = spec_from(decl);
            let applied = segments.update(&id.to_string(), None, &spec).await?;
            output::print_status(&format!("Updated L2 segment {id}"), global.quiet);
            let out = output::render_single(
                &global.output,
                &applied,
                |a| format!("ID:       {}\nStatus:   {}", a.id, a.state.status),
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        L2Command::Delete { id } => {
            if !segments.delete_segment(id).await? {
                return Err(CliError::Unconfirmed { segment_id: id });
            }
            output::print_status(&format!("Deleted L2 segment {id}"), global.quiet);
            Ok(())
        }
    }
}
