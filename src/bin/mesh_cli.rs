#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mesh_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    use vascular_viewer::anatomy::AnatomyModel;
    use vascular_viewer::geom::{GeomMesh, GeomMeshDiagnostics, count_open_edges};
    use vascular_viewer::render::{BatchKey, MeshBuildOptions, MeshBuilder, RenderBatch, VesselBatches};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"mesh_cli (vascular-viewer)

USAGE:
  mesh_cli list
  mesh_cli segments
  mesh_cli run <batch|all> [options]

BATCHES:
  arteryMajor  arteryMedium  arterySmall
  veinMajor    veinMedium    veinSmall

OPTIONS (run):
  --out-dir <dir>    Write <batch>.obj and/or <batch>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single batch only)
  --snap <path>      Write snapshot (single batch only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --density <n>      Smoothed points per control span (default 12)
  --no-displace      Build plain tubes without organic displacement
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => cmd_list(),
            "segments" => {
                print_segments();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn build(options: MeshBuildOptions) -> Result<VesselBatches, String> {
        MeshBuilder::new(options)
            .build(&AnatomyModel::standard())
            .map_err(|e| format!("build failed: {e}"))
    }

    fn cmd_list() -> Result<(), String> {
        let batches = build(MeshBuildOptions::default())?;
        for batch in batches.iter() {
            println!(
                "{:<13} segments={:<4} vertices={:<7} triangles={}",
                batch.name(),
                batch.segment_count,
                batch.mesh.vertex_count(),
                batch.mesh.triangle_count()
            );
        }
        eprintln!("{}", batches.diagnostics().summary());
        Ok(())
    }

    fn print_segments() {
        for segment in &AnatomyModel::standard() {
            println!(
                "{:<12} {} tier={} r={} points={}  {}",
                BatchKey::for_segment(segment).name(),
                segment.kind().as_str(),
                segment.depth_tier(),
                segment.radius(),
                segment.control_points().len(),
                segment.label()
            );
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let batch_name = args.next().ok_or("missing batch name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;
        let mut options = MeshBuildOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--density" => {
                    let value = args.value("--density")?;
                    let density = value
                        .parse::<usize>()
                        .map_err(|e| format!("invalid --density `{value}`: {e}"))?;
                    options = options.density(density);
                }
                "--no-displace" => options = options.displace(false),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if batch_name != "all" && BatchKey::from_name(&batch_name).is_none() {
            return Err(unknown_batch(&batch_name));
        }

        let batches = build(options)?;

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if batch_name == "all" {
                for batch in batches.iter() {
                    write_batch_to_dir(batch, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let batch = find_batch(&batches, &batch_name)?;
            return write_batch_to_dir(batch, dir, write_obj, write_snap, overwrite);
        }

        if batch_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let batch = find_batch(&batches, &batch_name)?;
        let snapshot = batch_snapshot(batch);

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{snapshot}");
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &batch.mesh, batch.name(), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(batch);
        Ok(())
    }

    fn find_batch<'a>(batches: &'a VesselBatches, name: &str) -> Result<&'a RenderBatch, String> {
        batches
            .by_name(name)
            .ok_or_else(|| format!("batch `{name}` is empty in this build"))
    }

    fn write_batch_to_dir(
        batch: &RenderBatch,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        if write_snap {
            let path = dir.join(format!("{}.snap", batch.name()));
            write_text_file(&path, &batch_snapshot(batch), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{}.obj", batch.name()));
            write_obj_file(&path, &batch.mesh, batch.name(), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(batch);
        Ok(())
    }

    fn report(batch: &RenderBatch) {
        eprintln!(
            "{}: segments={} vertices={} triangles={}",
            batch.name(),
            batch.segment_count,
            batch.mesh.vertex_count(),
            batch.mesh.triangle_count()
        );
    }

    fn unknown_batch(name: &str) -> String {
        let mut msg = String::new();
        let _ = writeln!(msg, "unknown batch `{name}`\n\navailable batches:");
        for key in BatchKey::ALL {
            let _ = writeln!(msg, "  {}", key.name());
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# vascular-viewer mesh_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        // Vertex colours go after the position, as most OBJ readers accept.
        match mesh.colors.as_ref() {
            Some(colors) => {
                for (p, c) in mesh.positions.iter().zip(colors.iter()) {
                    writeln!(w, "v {} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])
                        .map_err(|e| format!("write obj: {e}"))?;
                }
            }
            None => {
                for p in mesh.positions.iter() {
                    writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
                }
            }
        }

        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals.iter() {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        let has_normals = mesh.normals.is_some();
        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;

            if has_normals {
                writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")
            } else {
                writeln!(w, "f {a} {b} {c}")
            }
            .map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    fn write_diagnostics(out: &mut String, diag: &GeomMeshDiagnostics) {
        let _ = writeln!(out, "diag.vertex_count {}", diag.vertex_count);
        let _ = writeln!(out, "diag.triangle_count {}", diag.triangle_count);
        let _ = writeln!(out, "diag.open_edge_count {}", diag.open_edge_count);
        let _ = writeln!(out, "diag.displaced_vertex_count {}", diag.displaced_vertex_count);
        let _ = writeln!(out, "diag.segment_count {}", diag.segment_count);
        let _ = writeln!(out, "diag.skipped_batch_count {}", diag.skipped_batch_count);
        let _ = writeln!(out, "diag.warning_count {}", diag.warnings.len());
        for (idx, warning) in diag.warnings.iter().enumerate() {
            let _ = writeln!(out, "diag.warning.{idx} {warning}");
        }
    }

    fn write_mesh(out: &mut String, mesh: &GeomMesh) {
        let _ = writeln!(out, "mesh.vertex_count {}", mesh.vertex_count());
        let _ = writeln!(out, "mesh.triangle_count {}", mesh.triangle_count());

        let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
        for p in mesh.positions.iter().copied() {
            write_vec3_line(out, "p", p);
        }

        let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
        for tri in mesh.indices.chunks_exact(3) {
            let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
        }

        for (label, prefix, attr) in [("normals", "n", &mesh.normals), ("colors", "c", &mesh.colors)] {
            if let Some(values) = attr.as_ref() {
                let _ = writeln!(out, "mesh.{label} {}", values.len());
                for v in values.iter().copied() {
                    write_vec3_line(out, prefix, v);
                }
            } else {
                let _ = writeln!(out, "mesh.{label} none");
            }
        }
    }

    fn batch_diagnostics(batch: &RenderBatch) -> GeomMeshDiagnostics {
        GeomMeshDiagnostics {
            vertex_count: batch.mesh.vertex_count(),
            triangle_count: batch.mesh.triangle_count(),
            open_edge_count: count_open_edges(&batch.mesh.indices),
            segment_count: batch.segment_count,
            ..GeomMeshDiagnostics::default()
        }
    }

    fn batch_snapshot(batch: &RenderBatch) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# vascular-viewer batch v1");
        let _ = writeln!(out, "batch {}", batch.name());
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        let _ = writeln!(out, "segments {}", batch.segment_count);
        let m = batch.material;
        let _ = writeln!(
            out,
            "material emissive={} roughness={} opacity={} transmission={} thickness={} clearcoat={} metalness={}",
            m.emissive_intensity, m.roughness, m.opacity, m.transmission, m.thickness, m.clearcoat, m.metalness
        );
        write_diagnostics(&mut out, &batch_diagnostics(batch));
        write_mesh(&mut out, &batch.mesh);
        normalize_snapshot_text(&out)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
