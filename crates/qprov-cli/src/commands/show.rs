//! Show command implementation.
//!
//! Prints one record section by section, skipping sections that were
//! never captured.

use anyhow::Result;
use console::style;
use qprov_model::Record;

use super::common::{load_record, open_store};

/// Execute the show command.
pub fn execute(reference: &str) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;

    println!(
        "{} Record {}",
        style("→").cyan().bold(),
        style(&record.id).dim()
    );
    println!("  Created:      {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Format:       {}", record.format_version);
    println!("  Content hash: {}", style(record.content_hash()).yellow());
    println!("  Summary:      {}", record.summary());
    if let Some(parent) = &record.parent_id {
        println!("  Parent:       {}", style(parent).dim());
    }

    print_metadata(&record);
    print_environment(&record);
    print_circuits(&record);
    print_transpilation(&record);
    print_hardware(&record);
    print_execution(&record);
    print_result(&record);

    Ok(())
}

fn section(title: &str) {
    println!("\n{}", style(title).bold());
}

fn print_metadata(record: &Record) {
    let meta = &record.metadata;
    if meta == &qprov_model::Metadata::default() {
        return;
    }

    section("Metadata");
    if let Some(name) = &meta.name {
        println!("  Name:        {name}");
    }
    if let Some(description) = &meta.description {
        println!("  Description: {description}");
    }
    if !meta.tags.is_empty() {
        println!("  Tags:        {}", meta.tags.join(", "));
    }
    if !meta.authors.is_empty() {
        println!("  Authors:     {}", meta.authors.join(", "));
    }
    if let Some(paper) = &meta.paper {
        println!("  Paper:       {}", style(paper).underlined());
    }
    if let Some(experiment_id) = &meta.experiment_id {
        println!("  Experiment:  {experiment_id}");
    }
}

fn print_environment(record: &Record) {
    let Some(env) = &record.environment else {
        return;
    };

    section("Environment");
    println!("  Interpreter: {}", env.interpreter);
    println!("  Platform:    {}", env.platform);
    if let Some(sdk) = env.quantum_sdk() {
        println!("  Quantum SDK: {}", style(sdk).cyan());
    }
    println!("  Packages:    {}", env.packages.len());
}

fn print_circuits(record: &Record) {
    if record.circuits.is_empty() {
        return;
    }

    section("Circuits");
    for circuit in &record.circuits {
        let name = circuit.name.as_deref().unwrap_or("(unnamed)");
        println!(
            "  {} - {}q/{}c, depth {}, {} gates ({} two-qubit)",
            style(name).bold(),
            circuit.num_qubits,
            circuit.num_clbits,
            circuit.depth,
            circuit.gates.total,
            circuit.gates.two_qubit,
        );
        println!("    Hash: {}", style(&circuit.hash).yellow());
        if circuit.qasm.is_some() {
            println!("    QASM: captured");
        }
    }
}

fn print_transpilation(record: &Record) {
    let Some(transpilation) = &record.transpilation else {
        return;
    };

    section("Transpilation");
    if let Some(level) = transpilation.optimization_level {
        println!("  Optimization level: {level}");
    }
    if let Some(basis) = &transpilation.basis_gates {
        println!("  Basis gates:        {}", basis.join(", "));
    }
    if let Some(seed) = transpilation.seed {
        println!("  Seed:               {seed}");
    }
    if let Some(layout) = &transpilation.layout_method {
        println!("  Layout method:      {layout}");
    }
    if let Some(routing) = &transpilation.routing_method {
        println!("  Routing method:     {routing}");
    }
    if let Some(ratio) = transpilation.depth_ratio() {
        println!("  Depth ratio:        {ratio:.2}");
    }
}

fn print_hardware(record: &Record) {
    let Some(hw) = &record.hardware else {
        return;
    };

    section("Hardware");
    println!("  Provider: {}", hw.provider);
    println!(
        "  Backend:  {} ({} qubits{})",
        style(&hw.backend).cyan(),
        hw.num_qubits,
        if hw.is_simulator { ", simulator" } else { "" },
    );
    if !hw.qubits_used.is_empty() {
        println!("  Qubits:   {:?}", hw.qubits_used);
    }
    if let Some(cal) = &hw.calibration {
        println!(
            "  Calibration: {} ({} qubits, {} gates)",
            cal.timestamp.format("%Y-%m-%d %H:%M UTC"),
            cal.qubits.len(),
            cal.gates.len(),
        );
    }
}

fn print_execution(record: &Record) {
    let Some(exec) = &record.execution else {
        return;
    };

    section("Execution");
    println!("  Shots: {}", exec.shots);
    if let Some(job_id) = &exec.job_id {
        println!("  Job:   {}", style(job_id).dim());
    }
    if let Some(seed) = exec.seed {
        println!("  Seed:  {seed}");
    }
    if let Some(mitigation) = &exec.error_mitigation {
        println!("  Error mitigation: {}", mitigation.method);
    }
    if let Some(queue) = exec.queue_time_seconds() {
        println!("  Queue time:       {queue:.1}s");
    }
    if let Some(duration) = exec.execution_time_seconds() {
        println!("  Execution time:   {duration:.1}s");
    }
}

fn print_result(record: &Record) {
    let Some(result) = &record.result else {
        return;
    };

    section("Results");
    println!("  Shots measured: {}", result.counts.shots);
    println!("  Hash:           {}", style(&result.hash).yellow());
    for (bitstring, probability) in result.counts.top_results(5) {
        println!("    {bitstring}: {:.1}%", probability * 100.0);
    }
    if result.mitigated_counts.is_some() {
        println!("  Mitigated counts: captured");
    }
}
