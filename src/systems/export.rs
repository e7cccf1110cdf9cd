// saves the generated scene as an OBJ file, world-space coordinates

use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use std::fs::File;
use std::io::{BufWriter, Write};

// export event
#[derive(Event)]
pub struct ExportEvent {
    pub filename: String,
}

// write one mesh, baking its world transform into the vertices
// OBJ indices are global and 1-based, hence the running offset
fn write_mesh(
    writer: &mut BufWriter<File>,
    mesh: &Mesh,
    transform: &GlobalTransform,
    name: usize,
    vertex_offset: &mut u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return Ok(());
    };

    writeln!(writer, "o Mesh_{}", name)?;

    for position in positions {
        let world = transform.transform_point(Vec3::from_array(*position));
        writeln!(writer, "v {} {} {}", world.x, world.y, world.z)?;
    }

    if let Some(indices) = mesh.indices() {
        let indices: Vec<u32> = indices.iter().map(|i| i as u32).collect();
        for triangle in indices.chunks_exact(3) {
            writeln!(
                writer,
                "f {} {} {}",
                triangle[0] + *vertex_offset,
                triangle[1] + *vertex_offset,
                triangle[2] + *vertex_offset,
            )?;
        }
    }

    *vertex_offset += positions.len() as u32;
    Ok(())
}

pub fn export_obj(
    meshes: &Assets<Mesh>,
    entities: &Query<(&Mesh3d, &GlobalTransform)>,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# neon transit scene export")?;

    let mut vertex_offset = 1;
    let mut mesh_count = 0;

    for (mesh3d, transform) in entities.iter() {
        if let Some(mesh) = meshes.get(&mesh3d.0) {
            write_mesh(&mut writer, mesh, transform, mesh_count, &mut vertex_offset)?;
            mesh_count += 1;
        }
    }

    writer.flush()?;
    info!("exported {} meshes to {}", mesh_count, filename);
    Ok(())
}

pub fn handle_export(
    mut events: EventReader<ExportEvent>,
    meshes: Res<Assets<Mesh>>,
    entities: Query<(&Mesh3d, &GlobalTransform)>,
) {
    for event in events.read() {
        if let Err(error) = export_obj(&meshes, &entities, &event.filename) {
            warn!("export to {} failed: {}", event.filename, error);
        }
    }
}
