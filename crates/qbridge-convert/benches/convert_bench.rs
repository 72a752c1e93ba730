//! Benchmarks for circuit conversion
//!
//! Run with: cargo bench -p qbridge-convert

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qbridge_adapter_braket::Circuit as BraketCircuit;
use qbridge_adapter_braket::device::{self, IONQ_FORTE, RIGETTI_ANKAA_3};
use qbridge_adapter_qiskit::QuantumCircuit;
use qbridge_convert::{
    aws_device_to_target, braket_roundtrip, convert_qiskit_to_braket_circuit, from_braket_circuit,
};
use qbridge_ir::equivalence::EquivalenceOptions;
use std::f64::consts::PI;

/// Layered circuit: a rotation on every qubit, then a CX ladder.
fn qiskit_layers(n: u32, layers: u32) -> QuantumCircuit {
    let mut qc = QuantumCircuit::new(n, 0);
    for layer in 0..layers {
        for q in 0..n {
            qc.ry(PI / f64::from(layer + 2), q).unwrap();
        }
        for q in 0..n - 1 {
            qc.cx(q, q + 1).unwrap();
        }
    }
    qc.measure_all().unwrap();
    qc
}

fn braket_layers(n: u32, layers: u32) -> BraketCircuit {
    let mut circ = BraketCircuit::new();
    for layer in 0..layers {
        for q in 0..n {
            circ.rx(q, PI / f64::from(layer + 2)).unwrap();
        }
        for q in 0..n - 1 {
            circ.cz(q, q + 1).unwrap();
        }
    }
    circ
}

/// Benchmark Qiskit → Braket
fn bench_qiskit_to_braket(c: &mut Criterion) {
    let mut group = c.benchmark_group("qiskit_to_braket");

    for num_qubits in &[5, 20, 50] {
        let qc = qiskit_layers(*num_qubits, 10);
        group.bench_with_input(BenchmarkId::new("layers", num_qubits), &qc, |b, qc| {
            b.iter(|| convert_qiskit_to_braket_circuit(black_box(qc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark Braket → Qiskit
fn bench_braket_to_qiskit(c: &mut Criterion) {
    let mut group = c.benchmark_group("braket_to_qiskit");

    for num_qubits in &[5, 20, 50] {
        let circ = braket_layers(*num_qubits, 10);
        group.bench_with_input(BenchmarkId::new("layers", num_qubits), &circ, |b, circ| {
            b.iter(|| from_braket_circuit(black_box(circ)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full Braket round trip including the equivalence check
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("braket_roundtrip");
    let options = EquivalenceOptions::default();

    for num_qubits in &[5, 20] {
        let circ = braket_layers(*num_qubits, 10);
        group.bench_with_input(BenchmarkId::new("layers", num_qubits), &circ, |b, circ| {
            b.iter(|| braket_roundtrip(black_box(circ), Default::default(), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark device → Target
fn bench_device_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("device_target");

    for (name, arn) in [("ionq_forte", IONQ_FORTE), ("rigetti_ankaa", RIGETTI_ANKAA_3)] {
        let caps = device::capabilities_for_device(arn).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| aws_device_to_target(black_box(&caps)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_qiskit_to_braket,
    bench_braket_to_qiskit,
    bench_roundtrip,
    bench_device_target,
);

criterion_main!(benches);
