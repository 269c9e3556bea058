//! Textual status renderer.
//!
//! Consumes engine snapshots and prints the state tables: the instruction
//! status board, the four reservation station groups, the reorder buffer,
//! the rename map, and the in-flight units. Never touches the engine.

use tomsim_core::engine::rob::RobState;
use tomsim_core::isa::instruction::FuClass;
use tomsim_core::snapshot::Snapshot;

/// Formats an optional cycle stamp; unset stamps render as `-`.
fn stamp(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Prints all status tables for one snapshot.
pub fn print_status(snap: &Snapshot) {
    println!("\n==== Cycle {} ====", snap.cycle);

    println!("\nInstructions:");
    println!("------------------------------------------------------------------");
    println!("| #  | Instruction      | Issue | ExecComp | Write | Commit |");
    println!("------------------------------------------------------------------");
    for (index, inst) in snap.instructions.iter().enumerate() {
        let t = inst.timing;
        println!(
            "| {:<2} | {:<16} | {:>5} | {:>8} | {:>5} | {:>6} |",
            index,
            inst.operation.to_string(),
            stamp(t.issue),
            stamp(t.execute_complete),
            stamp(t.write_result),
            stamp(t.commit),
        );
    }
    println!("------------------------------------------------------------------");

    for class in FuClass::ALL {
        print_station_group(snap, class);
    }

    print_rob(snap);

    if !snap.register_status.is_empty() {
        println!("\nRegister status:");
        let rows: Vec<String> = snap
            .register_status
            .iter()
            .map(|(reg, tag)| format!("{reg} -> {tag}"))
            .collect();
        println!("  {}", rows.join("  "));
    }

    if !snap.units.is_empty() {
        println!("\nExecuting:");
        for record in &snap.units {
            println!(
                "  {} #{} -> {} ({} cycles left)",
                record.rs, record.instr, record.rob, record.remaining
            );
        }
    }

    if !snap.cdb.is_empty() {
        let queued: Vec<String> = snap.cdb.iter().map(|tag| tag.to_string()).collect();
        println!("\nCDB queue: {}", queued.join(" "));
    }
}

/// Prints one reservation station group.
fn print_station_group(snap: &Snapshot, class: FuClass) {
    println!("\nReservation stations {class}:");
    println!("----------------------------------------------------------------");
    println!("| # | Busy | Op  | Vj   | Vk   | Qj   | Qk   | Dest | A    | Inst |");
    println!("----------------------------------------------------------------");
    for view in snap.stations.iter().filter(|v| v.id.class == class) {
        let rs = view.station;
        if rs.busy {
            let value = |v: i64, q: Option<_>| {
                if q.is_none() {
                    v.to_string()
                } else {
                    "-".to_string()
                }
            };
            let tag = |q: Option<tomsim_core::engine::rob::RobTag>| {
                q.map_or_else(|| "-".to_string(), |t| t.to_string())
            };
            println!(
                "| {} | yes  | {:<3} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} |",
                view.id.index,
                rs.op.to_string(),
                value(rs.vj, rs.qj),
                value(rs.vk, rs.qk),
                tag(rs.qj),
                tag(rs.qk),
                rs.dest_rob.to_string(),
                rs.addr,
                rs.instr,
            );
        } else {
            println!(
                "| {} | no   |     |      |      |      |      |      |      |      |",
                view.id.index
            );
        }
    }
    println!("----------------------------------------------------------------");
}

/// Prints the reorder buffer.
fn print_rob(snap: &Snapshot) {
    let rob = &snap.rob;
    println!(
        "\nReorder buffer (head={} tail={} free={}/{}):",
        rob.head, rob.tail, rob.free_slots, rob.capacity
    );
    println!("--------------------------------------------------------------");
    println!("| #  | Inst | Kind | State       | Dest | Value | Rdy | Addr |");
    println!("--------------------------------------------------------------");
    for (index, entry) in rob.entries.iter().enumerate() {
        if entry.valid {
            println!(
                "| {:<2} | {:>4} | {:<4} | {:<11} | {:>4} | {:>5} | {:>3} | {:>4} |",
                index,
                entry.instr,
                entry.kind.to_string(),
                entry.state.to_string(),
                entry.dest.map_or_else(|| "-".to_string(), |r| r.to_string()),
                if entry.value_ready {
                    entry.value.to_string()
                } else {
                    "-".to_string()
                },
                if entry.value_ready { "yes" } else { "no" },
                if entry.state == RobState::WroteResult || entry.address != 0 {
                    entry.address.to_string()
                } else {
                    "-".to_string()
                },
            );
        } else {
            println!(
                "| {:<2} |      |      | Empty       |      |       |     |      |",
                index
            );
        }
    }
    println!("--------------------------------------------------------------");
}

/// Prints the full architectural register file.
pub fn print_registers(snap: &Snapshot) {
    println!("\nFinal register values:");
    println!("---------------------------------");
    for row in snap.registers.chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|(reg, value)| format!("{:<4} = {:<8}", reg.to_string(), value))
            .collect();
        println!("  {}", cells.join(" "));
    }
    println!("---------------------------------");
}
