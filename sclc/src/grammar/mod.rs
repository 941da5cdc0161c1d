// Copyright (c) 2022, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! The engine scene grammar: one registration per directive, the way every
//! engine module contributes its own sections to the shared table.

mod parsers;
pub mod summary;

use std::collections::HashMap;

use bp3d_scl::{section_id, Descriptor, DirectiveTable, SectionId};

/// Name of the user-context slot holding the build [summary::Summary].
pub const CTX_SUMMARY: &str = "sclc";

pub const ROOT: SectionId = section_id(*b"ROOT");
pub const SCENE: SectionId = section_id(*b"SCNE");
pub const NODE: SectionId = section_id(*b"NODE");
pub const CAMERA: SectionId = section_id(*b"CAMR");
pub const MATERIAL: SectionId = section_id(*b"MTRL");
pub const PASS: SectionId = section_id(*b"PASS");
pub const TEXTURE: SectionId = section_id(*b"TXUN");
pub const SAMPLER: SectionId = section_id(*b"SMPL");

fn fog_types() -> HashMap<String, u32>
{
    let mut map = HashMap::new();
    map.insert(String::from("none"), 0);
    map.insert(String::from("linear"), 1);
    map.insert(String::from("exponential"), 2);
    map.insert(String::from("squared_exponential"), 3);
    map
}

fn blend_factors() -> HashMap<String, u32>
{
    let mut map = HashMap::new();
    map.insert(String::from("zero"), 0);
    map.insert(String::from("one"), 1);
    map.insert(String::from("src_colour"), 2);
    map.insert(String::from("inv_src_colour"), 3);
    map.insert(String::from("dst_colour"), 4);
    map.insert(String::from("inv_dst_colour"), 5);
    map.insert(String::from("src_alpha"), 6);
    map.insert(String::from("inv_src_alpha"), 7);
    map.insert(String::from("dst_alpha"), 8);
    map.insert(String::from("inv_dst_alpha"), 9);
    map
}

fn write_channels() -> HashMap<String, u32>
{
    let mut map = HashMap::new();
    map.insert(String::from("red"), 1);
    map.insert(String::from("green"), 2);
    map.insert(String::from("blue"), 4);
    map.insert(String::from("alpha"), 8);
    map
}

fn texture_channels() -> HashMap<String, u32>
{
    let mut map = HashMap::new();
    map.insert(String::from("diffuse"), 0);
    map.insert(String::from("normal"), 1);
    map.insert(String::from("specular"), 2);
    map.insert(String::from("height"), 3);
    map.insert(String::from("opacity"), 4);
    map.insert(String::from("gloss"), 5);
    map
}

fn filters() -> HashMap<String, u32>
{
    let mut map = HashMap::new();
    map.insert(String::from("nearest"), 0);
    map.insert(String::from("linear"), 1);
    map
}

pub fn build_table() -> DirectiveTable
{
    let mut table = DirectiveTable::new(ROOT);
    table.add_section(SCENE, "scene");
    table.add_section(NODE, "scene_node");
    table.add_section(CAMERA, "camera");
    table.add_section(MATERIAL, "material");
    table.add_section(PASS, "pass");
    table.add_section(TEXTURE, "texture_unit");
    table.add_section(SAMPLER, "sampler");

    table.add_parser(ROOT, "scene", parsers::root_scene, vec![Descriptor::Name]);
    table.add_parser(ROOT, "material", parsers::root_material, vec![Descriptor::Name]);
    table.add_parser(ROOT, "sampler", parsers::root_sampler, vec![Descriptor::Name]);
    table.add_parser(
        ROOT,
        "font",
        parsers::root_font,
        vec![Descriptor::Name, Descriptor::Path, Descriptor::UInt32]
    );

    table.add_parser(SCENE, "ambient_light", parsers::scene_ambient_light, vec![Descriptor::Colour]);
    table.add_parser(
        SCENE,
        "background_colour",
        parsers::scene_background_colour,
        vec![Descriptor::Colour]
    );
    table.add_parser(
        SCENE,
        "background_image",
        parsers::scene_background_image,
        vec![Descriptor::Path]
    );
    table.add_parser(
        SCENE,
        "fog_type",
        parsers::scene_fog_type,
        vec![Descriptor::CheckedText(fog_types())]
    );
    table.add_parser(SCENE, "fog_density", parsers::scene_fog_density, vec![Descriptor::Float]);
    table.add_parser(SCENE, "scene_node", parsers::scene_scene_node, vec![Descriptor::Name]);
    table.add_parser(SCENE, "camera", parsers::scene_camera, vec![Descriptor::Name]);

    table.add_parser(NODE, "position", parsers::node_position, vec![Descriptor::Point3F]);
    table.add_parser(NODE, "scale", parsers::node_scale, vec![Descriptor::Point3F]);
    table.add_parser(NODE, "orientation", parsers::node_orientation, vec![Descriptor::Point4F]);
    table.add_parser(NODE, "parent", parsers::node_parent, vec![Descriptor::Name]);

    table.add_parser(CAMERA, "parent", parsers::camera_parent, vec![Descriptor::Name]);
    table.add_parser(CAMERA, "viewport", parsers::camera_viewport, vec![Descriptor::Size]);
    table.add_parser(CAMERA, "fov_y", parsers::camera_fov_y, vec![Descriptor::Float]);
    table.add_parser(CAMERA, "near", parsers::camera_near, vec![Descriptor::Float]);
    table.add_parser(CAMERA, "far", parsers::camera_far, vec![Descriptor::Float]);

    table.add_parser(MATERIAL, "pass", parsers::material_pass, vec![]);
    table.add_parser(MATERIAL, "}", parsers::material_end, vec![]);

    table.add_parser(PASS, "diffuse", parsers::pass_colour, vec![Descriptor::Colour]);
    table.add_parser(PASS, "specular", parsers::pass_colour, vec![Descriptor::Colour]);
    table.add_parser(PASS, "emissive", parsers::pass_colour, vec![Descriptor::Colour]);
    table.add_parser(PASS, "shininess", parsers::pass_shininess, vec![Descriptor::Float]);
    table.add_parser(PASS, "alpha", parsers::pass_alpha, vec![Descriptor::Float]);
    table.add_parser(PASS, "two_sided", parsers::pass_two_sided, vec![Descriptor::Bool]);
    table.add_parser(
        PASS,
        "blend_func",
        parsers::pass_blend_func,
        vec![
            Descriptor::CheckedText(blend_factors()),
            Descriptor::CheckedText(blend_factors()),
        ]
    );
    table.add_parser(
        PASS,
        "write_mask",
        parsers::pass_write_mask,
        vec![Descriptor::Bitfield32(write_channels())]
    );
    table.add_parser(PASS, "texture_unit", parsers::pass_texture_unit, vec![]);
    table.add_parser(PASS, "}", parsers::pass_end, vec![]);

    table.add_parser(TEXTURE, "image", parsers::texture_image, vec![Descriptor::Path]);
    table.add_parser(
        TEXTURE,
        "channel",
        parsers::texture_channel,
        vec![Descriptor::CheckedText(texture_channels())]
    );
    table.add_parser(TEXTURE, "levels", parsers::texture_levels, vec![Descriptor::UInt32]);
    table.add_parser(TEXTURE, "crop", parsers::texture_crop, vec![Descriptor::Rectangle]);
    table.add_parser(TEXTURE, "sampler", parsers::texture_sampler, vec![Descriptor::Name]);

    table.add_parser(
        SAMPLER,
        "min_filter",
        parsers::sampler_filter,
        vec![Descriptor::CheckedText(filters())]
    );
    table.add_parser(
        SAMPLER,
        "mag_filter",
        parsers::sampler_filter,
        vec![Descriptor::CheckedText(filters())]
    );
    table.add_parser(
        SAMPLER,
        "border_colour",
        parsers::sampler_border_colour,
        vec![Descriptor::Colour]
    );
    table.add_parser(
        SAMPLER,
        "max_anisotropy",
        parsers::sampler_max_anisotropy,
        vec![Descriptor::Float]
    );
    table.add_parser(SAMPLER, "lod_bias", parsers::sampler_lod_bias, vec![Descriptor::Float]);
    table
}

#[cfg(test)]
mod tests
{
    use bp3d_scl::{Context, FileParser};

    use super::summary::Summary;
    use super::*;

    fn check(content: &str) -> (bool, u32, Summary)
    {
        let table = build_table();
        let mut parser = FileParser::new(&table);
        let mut ctx = Context::new("test.cscn");
        ctx.register_user_context(CTX_SUMMARY, Box::new(Summary::default()));
        let ok = parser.parse(&mut ctx, content);
        let summary = *ctx
            .unregister_user_context(CTX_SUMMARY)
            .unwrap()
            .downcast::<Summary>()
            .unwrap();
        (ok, parser.error_count(), summary)
    }

    #[test]
    fn full_scene_file()
    {
        let source = "\
// A small but complete scene.
sampler \"Trilinear\"
{
    min_filter linear
    mag_filter linear
    border_colour black
    max_anisotropy 16.0
}

material \"Stone\"
{
    pass
    {
        diffuse 0.8 0.8 0.8
        specular #202020
        shininess 50.0
        two_sided false
        blend_func src_alpha inv_src_alpha
        write_mask red|green|blue
        texture_unit
        {
            image textures/stone.png
            channel diffuse
            levels 8
            crop 0 0 256 256
            sampler \"Trilinear\"
        }
    }
}

scene \"Main\"
{
    ambient_light 0.1 0.1 0.1
    background_colour black
    fog_type linear
    fog_density 0.02
    scene_node \"RootNode\"
    {
        position 0 1.5 -3
        scale 1 1 1
        orientation 0 1 0 90
    }
    camera \"MainCamera\"
    {
        parent \"RootNode\"
        viewport 1280 720
        fov_y 45.0
        near 0.1
        far 1000.0
    }
}

font \"Arial\" fonts/arial.ttf 32
";
        let (ok, errors, summary) = check(source);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(summary.scenes, vec!["Main"]);
        assert_eq!(summary.materials, vec!["Stone"]);
        assert_eq!(summary.samplers, vec!["Trilinear"]);
        assert_eq!(summary.fonts, vec!["Arial"]);
        assert_eq!(summary.nodes, 1);
        assert_eq!(summary.cameras, 1);
        assert_eq!(summary.passes, 1);
        assert_eq!(summary.texture_units, 1);
        // The material cleanup handler ran on block exit.
        assert_eq!(summary.current_material, None);
    }

    #[test]
    fn unknown_directive_keeps_the_rest()
    {
        let source = "\
material \"A\"
{
    refraction_index 1.2
    pass
    {
        diffuse red
    }
}
";
        let (ok, errors, summary) = check(source);
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(summary.passes, 1);
    }

    #[test]
    fn sections_do_not_bleed()
    {
        // A pass directive is meaningless at root scope.
        let (ok, errors, summary) = check("pass\n{\n    diffuse red\n}\n");
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(summary.passes, 0);
    }

    #[test]
    fn bad_parameter_reports_and_recovers()
    {
        let source = "\
material \"A\"
{
    pass
    {
        shininess very_shiny
        alpha 0.5
    }
}
";
        let (ok, errors, summary) = check(source);
        assert!(ok);
        // One validation error, plus the handler rejecting the wrapped
        // free-text value it received instead of a float.
        assert_eq!(errors, 2);
        assert_eq!(summary.passes, 1);
    }
}
