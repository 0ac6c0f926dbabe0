/// WGSL shader for lit meshes.
///
/// Ambient and hemisphere terms plus up to eight point or spot lights, with a
/// roughness-driven specular lobe. Back faces flip their normal so inward
/// facing shells light the same way as outward ones.
pub const MESH_SHADER: &str = r#"
struct Light {
    position: vec4<f32>,
    direction: vec4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

struct Frame {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    ambient: vec4<f32>,
    hemisphere_sky: vec4<f32>,
    hemisphere_ground: vec4<f32>,
    hemisphere_up: vec4<f32>,
    counts: vec4<f32>,
    lights: array<Light, 8>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) material: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) material: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    out.material = instance.material;
    return out;
}

fn distance_attenuation(d: f32, cutoff: f32, decay: f32) -> f32 {
    var att = pow(max(d, 0.01), -decay);
    if cutoff > 0.0 {
        let r = d / cutoff;
        att *= pow(clamp(1.0 - r * r * r * r, 0.0, 1.0), 2.0);
    }
    return att;
}

fn shade(n: vec3<f32>, l: vec3<f32>, v: vec3<f32>, albedo: vec3<f32>, metalness: f32, roughness: f32) -> vec3<f32> {
    let n_dot_l = max(dot(n, l), 0.0);
    let h = normalize(l + v);
    let r4 = max(pow(roughness, 4.0), 1e-4);
    let shininess = max(2.0 / r4 - 2.0, 0.0);
    let specular_color = mix(vec3<f32>(0.04), albedo, metalness);
    let specular = specular_color * pow(max(dot(n, h), 1e-4), shininess) * (shininess + 2.0) / 8.0;
    let diffuse = albedo * (1.0 - metalness);
    return (diffuse + specular) * n_dot_l;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    let v = normalize(frame.camera_position.xyz - in.world_position);

    var faceted = normalize(cross(dpdx(in.world_position), dpdy(in.world_position)));
    if dot(faceted, v) < 0.0 {
        faceted = -faceted;
    }
    var smooth_n = normalize(in.world_normal);
    if !front_facing {
        smooth_n = -smooth_n;
    }
    let n = select(smooth_n, faceted, in.material.z > 0.5);

    let albedo = pow(in.color.rgb, vec3<f32>(2.2));
    let metalness = in.material.x;
    let roughness = in.material.y;

    var light = frame.ambient.rgb * albedo;
    let hemi = dot(n, frame.hemisphere_up.xyz) * 0.5 + 0.5;
    light += mix(frame.hemisphere_ground.rgb, frame.hemisphere_sky.rgb, hemi) * albedo;

    let count = u32(frame.counts.x);
    for (var i = 0u; i < count; i = i + 1u) {
        let lt = frame.lights[i];
        let to_light = lt.position.xyz - in.world_position;
        let d = length(to_light);
        let l = to_light / max(d, 1e-4);
        var att = distance_attenuation(d, lt.color.w, lt.params.x);
        if lt.position.w > 0.5 {
            let cos_angle = dot(-l, normalize(lt.direction.xyz));
            if lt.params.y - lt.direction.w > 1e-5 {
                att *= smoothstep(lt.direction.w, lt.params.y, cos_angle);
            } else {
                att *= step(lt.direction.w, cos_angle);
            }
        }
        light += lt.color.rgb * att * shade(n, l, v, albedo, metalness, roughness);
    }

    return vec4<f32>(light, in.color.a);
}
"#;

/// WGSL shader for unlit helper lines in world space.
pub const LINE_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = frame.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
