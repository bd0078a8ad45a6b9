//! Scene description parser.
//!
//! The format is a sequence of entities. Each entity is a kind keyword, a
//! comma, and comma-separated `key: value` properties. Values are numbers or
//! bracketed lists. Whitespace (including newlines) is insignificant and `#`
//! starts a comment that runs to the end of the line.
//!
//! ```text
//! camera, width: 2.0, height: 2.0
//! sphere, position: [0, 1, -5], radius: 2, diffuse_color: [1, 0, 0]
//! plane, position: [0, -1, 0], normal: [0, 1, 0], diffuse_color: [0, 0.6, 0]
//! light, position: [5, 10, 0], color: [1, 1, 1], radial-a0: 1, radial-a1: 0, radial-a2: 0
//! ```

use std::fmt;
use std::path::Path;

use specula_math::Vec3;
use thiserror::Error;

use crate::scene::{
    Color, Light, LightKind, Material, Primitive, RadialAttenuation, Scene, Shape, DEFAULT_NS,
};

/// Errors that can occur while parsing a scene description.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected character {ch:?} at line {line}")]
    UnexpectedChar { line: usize, ch: char },

    #[error("Expected {expected} at line {line}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid number {text:?} at line {line}")]
    InvalidNumber { line: usize, text: String },

    #[error("Unknown entity kind {kind:?} at line {line}")]
    UnknownKind { line: usize, kind: String },

    #[error("Unknown property {key:?} for {kind} at line {line}")]
    UnknownKey {
        line: usize,
        kind: String,
        key: String,
    },

    #[error("Property {key:?} given twice at line {line}")]
    DuplicateKey { line: usize, key: String },

    #[error("{kind} at line {line} is missing required property {key:?}")]
    MissingKey {
        line: usize,
        kind: String,
        key: &'static str,
    },

    #[error("Property {key:?} at line {line} expects a number, found a list")]
    ExpectedScalar { line: usize, key: String },

    #[error("Property {key:?} at line {line} expects a list, found a number")]
    ExpectedList { line: usize, key: String },

    #[error("Property {key:?} at line {line} expects {expected} values, found {found}")]
    WrongArity {
        line: usize,
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Second camera at line {line}; only one camera is allowed")]
    DuplicateCamera { line: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Lexer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    Number(f32),
    Comma,
    Colon,
    LBracket,
    RBracket,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "{:?}", s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn tokenize(content: &str) -> ParseResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ',' | ':' | '[' | ']' => {
                let kind = match c {
                    ',' => TokenKind::Comma,
                    ':' => TokenKind::Colon,
                    '[' => TokenKind::LBracket,
                    _ => TokenKind::RBracket,
                };
                tokens.push(Token { kind, line });
                chars.next();
            }
            c if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_number_char(c) {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                let value = text
                    .parse::<f32>()
                    .map_err(|_| ParseError::InvalidNumber { line, text })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    line,
                });
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(text),
                    line,
                });
            }
            other => return Err(ParseError::UnexpectedChar { line, ch: other }),
        }
    }

    Ok(tokens)
}

// =============================================================================
// Entity grammar
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Scalar(f32),
    List(Vec<f32>),
}

#[derive(Debug)]
struct Property {
    key: String,
    value: Value,
    line: usize,
}

/// One `kind, key: value, ...` record with its properties not yet consumed.
#[derive(Debug)]
struct Entity {
    kind: String,
    line: usize,
    properties: Vec<Property>,
}

impl Entity {
    fn take(&mut self, key: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.key == key)?;
        Some(self.properties.remove(index))
    }

    fn scalar(&mut self, key: &str) -> ParseResult<Option<f32>> {
        match self.take(key) {
            None => Ok(None),
            Some(Property {
                value: Value::Scalar(v),
                ..
            }) => Ok(Some(v)),
            Some(p) => Err(ParseError::ExpectedScalar {
                line: p.line,
                key: p.key,
            }),
        }
    }

    fn array<const N: usize>(&mut self, key: &str) -> ParseResult<Option<[f32; N]>> {
        match self.take(key) {
            None => Ok(None),
            Some(Property {
                value: Value::List(values),
                line,
                key,
            }) => {
                let found = values.len();
                <[f32; N]>::try_from(values)
                    .map(Some)
                    .map_err(|_| ParseError::WrongArity {
                        line,
                        key,
                        expected: N,
                        found,
                    })
            }
            Some(p) => Err(ParseError::ExpectedList {
                line: p.line,
                key: p.key,
            }),
        }
    }

    fn vec3(&mut self, key: &str) -> ParseResult<Option<Vec3>> {
        Ok(self.array::<3>(key)?.map(Vec3::from_array))
    }

    fn required<T>(&self, value: Option<T>, key: &'static str) -> ParseResult<T> {
        value.ok_or_else(|| ParseError::MissingKey {
            line: self.line,
            kind: self.kind.clone(),
            key,
        })
    }

    /// Reject any property nobody consumed.
    fn finish(self) -> ParseResult<()> {
        match self.properties.into_iter().next() {
            None => Ok(()),
            Some(p) => Err(ParseError::UnknownKey {
                line: p.line,
                kind: self.kind,
                key: p.key,
            }),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn next(&mut self, expected: &'static str) -> ParseResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEof(expected))?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<usize> {
        let token = self.next(expected)?;
        if token.kind == kind {
            Ok(token.line)
        } else {
            Err(ParseError::UnexpectedToken {
                line: token.line,
                expected,
                found: token.kind.to_string(),
            })
        }
    }

    fn ident(&mut self, expected: &'static str) -> ParseResult<(String, usize)> {
        let token = self.next(expected)?;
        match token.kind {
            TokenKind::Ident(name) => Ok((name, token.line)),
            other => Err(ParseError::UnexpectedToken {
                line: token.line,
                expected,
                found: other.to_string(),
            }),
        }
    }

    fn number(&mut self) -> ParseResult<f32> {
        let token = self.next("a number")?;
        match token.kind {
            TokenKind::Number(n) => Ok(n),
            other => Err(ParseError::UnexpectedToken {
                line: token.line,
                expected: "a number",
                found: other.to_string(),
            }),
        }
    }

    fn value(&mut self) -> ParseResult<Value> {
        if self.peek_kind(0) != Some(&TokenKind::LBracket) {
            return Ok(Value::Scalar(self.number()?));
        }

        self.expect(TokenKind::LBracket, "'['")?;
        let mut values = vec![self.number()?];
        loop {
            let token = self.next("',' or ']'")?;
            match token.kind {
                TokenKind::Comma => values.push(self.number()?),
                TokenKind::RBracket => return Ok(Value::List(values)),
                other => {
                    return Err(ParseError::UnexpectedToken {
                        line: token.line,
                        expected: "',' or ']'",
                        found: other.to_string(),
                    })
                }
            }
        }
    }

    /// True if the next two tokens open a `key:` property.
    fn at_property(&self) -> bool {
        matches!(self.peek_kind(0), Some(TokenKind::Ident(_)))
            && self.peek_kind(1) == Some(&TokenKind::Colon)
    }

    /// True at end of input or at an entity kind (an identifier not followed by ':').
    fn at_entity_end(&self) -> bool {
        match self.peek_kind(0) {
            None => true,
            Some(TokenKind::Ident(_)) => self.peek_kind(1) != Some(&TokenKind::Colon),
            Some(_) => false,
        }
    }

    /// Consume the ',' that must follow an entity kind or a property value,
    /// unless the entity ends here.
    fn separator(&mut self, expected: &'static str) -> ParseResult<bool> {
        if self.peek_kind(0) == Some(&TokenKind::Comma) {
            self.pos += 1;
            return Ok(true);
        }
        if self.at_entity_end() {
            return Ok(false);
        }

        let token = self.next(expected)?;
        Err(ParseError::UnexpectedToken {
            line: token.line,
            expected,
            found: token.kind.to_string(),
        })
    }

    fn entity(&mut self) -> ParseResult<Entity> {
        let (kind, line) = self.ident("an entity kind")?;
        self.separator("',' after the entity kind")?;

        let mut properties: Vec<Property> = Vec::new();
        while self.at_property() {
            let (key, key_line) = self.ident("a property name")?;
            self.expect(TokenKind::Colon, "':'")?;
            let value = self.value()?;

            if properties.iter().any(|p| p.key == key) {
                return Err(ParseError::DuplicateKey {
                    line: key_line,
                    key,
                });
            }
            properties.push(Property {
                key,
                value,
                line: key_line,
            });

            // A trailing comma that is not followed by another property ends the entity
            if !self.separator("',' between properties")? {
                break;
            }
        }

        Ok(Entity {
            kind,
            line,
            properties,
        })
    }

    fn entities(&mut self) -> ParseResult<Vec<Entity>> {
        let mut entities = Vec::new();
        while self.peek().is_some() {
            entities.push(self.entity()?);
        }
        Ok(entities)
    }
}

// =============================================================================
// Scene construction
// =============================================================================

fn material(entity: &mut Entity) -> ParseResult<Material> {
    let material = Material {
        diffuse_color: entity.vec3("diffuse_color")?.unwrap_or(Color::ZERO),
        specular_color: entity.vec3("specular_color")?.unwrap_or(Color::ZERO),
        reflectivity: entity.scalar("reflectivity")?.unwrap_or(0.0),
        refractivity: entity.scalar("refractivity")?.unwrap_or(0.0),
        ior: entity.scalar("ior")?.unwrap_or(1.0),
        ns: entity.scalar("ns")?.unwrap_or(DEFAULT_NS),
    };

    if material.reflectivity + material.refractivity > 1.0 {
        log::warn!(
            "{} at line {}: reflectivity + refractivity = {} exceeds 1, local shading weight clamps to 0",
            entity.kind,
            entity.line,
            material.reflectivity + material.refractivity
        );
    }

    Ok(material)
}

fn primitive(entity: &mut Entity) -> ParseResult<Primitive> {
    let shape = match entity.kind.as_str() {
        "sphere" => {
            let center = entity.vec3("position")?;
            let center = entity.required(center, "position")?;
            let radius = entity.scalar("radius")?;
            let radius = entity.required(radius, "radius")?;
            if radius <= 0.0 {
                log::warn!("Sphere at line {} has non-positive radius {}", entity.line, radius);
            }
            Shape::sphere(center, radius)
        }
        "plane" => {
            let position = entity.vec3("position")?;
            let position = entity.required(position, "position")?;
            let normal = entity.vec3("normal")?;
            let normal = entity.required(normal, "normal")?;
            if normal.length_squared() == 0.0 {
                log::warn!("Plane at line {} has a zero normal and will never be hit", entity.line);
            }
            Shape::plane(position, normal)
        }
        _ => {
            let coefficients = entity.array::<10>("constants")?;
            Shape::quadric(entity.required(coefficients, "constants")?)
        }
    };

    let material = material(entity)?;
    Ok(Primitive::new(shape, material))
}

fn light(entity: &mut Entity) -> ParseResult<Light> {
    let position = entity.vec3("position")?;
    let position = entity.required(position, "position")?;
    let color = entity.vec3("color")?.unwrap_or(Color::ZERO);
    let attenuation = RadialAttenuation::new(
        entity.scalar("radial-a0")?.unwrap_or(1.0),
        entity.scalar("radial-a1")?.unwrap_or(0.0),
        entity.scalar("radial-a2")?.unwrap_or(0.0),
    );
    let theta = entity.scalar("theta")?;
    let angular_exponent = entity.scalar("angular-a0")?;

    let light = match entity.vec3("direction")? {
        Some(direction) => Light::spot(
            position,
            color,
            direction,
            theta.unwrap_or(0.0),
            angular_exponent.unwrap_or(0.0),
        ),
        None => {
            if theta.is_some() || angular_exponent.is_some() {
                log::warn!(
                    "Light at line {} has spot parameters but no direction; treating it as a point light",
                    entity.line
                );
            }
            Light::point(position, color)
        }
    };

    if let LightKind::Spot { theta, .. } = light.kind {
        if theta == 0.0 {
            log::warn!(
                "Spot light at line {} has a zero cutoff angle and emits nothing",
                entity.line
            );
        }
    }

    Ok(light.with_attenuation(attenuation))
}

/// Parse a scene description from a string.
///
/// The returned camera carries the parsed viewport size and default
/// resolution/distance; callers set those before rendering. The camera origin
/// is always the world origin.
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    let tokens = tokenize(content)?;
    let entities = Parser::new(tokens).entities()?;

    let mut scene = Scene::default();
    let mut camera_line: Option<usize> = None;

    for mut entity in entities {
        match entity.kind.as_str() {
            "camera" => {
                if camera_line.is_some() {
                    return Err(ParseError::DuplicateCamera { line: entity.line });
                }
                camera_line = Some(entity.line);
                let width = entity.scalar("width")?.unwrap_or(scene.camera.viewport_width);
                let height = entity.scalar("height")?.unwrap_or(scene.camera.viewport_height);
                scene.camera.viewport_width = width;
                scene.camera.viewport_height = height;
            }
            "sphere" | "plane" | "quadric" => {
                let primitive = primitive(&mut entity)?;
                log::debug!("Line {}: {:?}", entity.line, primitive);
                scene.add_primitive(primitive);
            }
            "light" => {
                let light = light(&mut entity)?;
                log::debug!("Line {}: {:?}", entity.line, light);
                scene.add_light(light);
            }
            _ => {
                return Err(ParseError::UnknownKind {
                    line: entity.line,
                    kind: entity.kind,
                })
            }
        }
        entity.finish()?;
    }

    if camera_line.is_none() {
        log::warn!(
            "Scene has no camera; using a {}x{} viewport",
            scene.camera.viewport_width,
            scene.camera.viewport_height
        );
    }
    scene.camera.anchor_at_world_origin();

    log::info!(
        "Parsed scene: {} primitives, {} lights",
        scene.primitive_count(),
        scene.light_count()
    );
    Ok(scene)
}

/// Load a scene description from a file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> ParseResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    log::info!("Loading scene from {}", path.display());
    parse_scene(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Camera;

    const SAMPLE: &str = "
# Two spheres over a floor
camera, width: 2.0, height: 1.5
sphere, position: [0, 1, -5], radius: 2, diffuse_color: [1, 0, 0],
        specular_color: [1, 1, 1], ns: 40, reflectivity: 0.3
plane, position: [0, -1, 0], normal: [0, 2, 0], diffuse_color: [0, 0.6, 0], reflectivity: 0.1
quadric, constants: [1, 1, 1, 0, 0, 0, 0, 0, 10, 24], diffuse_color: [0, 0, 1]
light, position: [5, 10, 0], color: [1, 1, 1], radial-a0: 1, radial-a1: 0.1, radial-a2: 0.01
light, position: [0, 5, 0], direction: [0, -1, 0], theta: 30, angular-a0: 2,
       color: [0.5, 0.5, 0.5], radial-a0: 1, radial-a1: 0, radial-a2: 0
";

    #[test]
    fn test_parse_sample_scene() {
        let scene = parse_scene(SAMPLE).unwrap();

        assert_eq!(scene.camera.viewport_width, 2.0);
        assert_eq!(scene.camera.viewport_height, 1.5);
        assert_eq!(scene.camera.origin, Vec3::ZERO);
        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(scene.light_count(), 2);

        let sphere = &scene.primitives[0];
        assert_eq!(sphere.shape, Shape::sphere(Vec3::new(0.0, 1.0, -5.0), 2.0));
        assert_eq!(sphere.material.diffuse_color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(sphere.material.specular_color, Color::ONE);
        assert_eq!(sphere.material.ns, 40.0);
        assert_eq!(sphere.material.reflectivity, 0.3);
        assert_eq!(sphere.material.refractivity, 0.0);

        // Plane normal is normalized and the offset derived from the position
        assert_eq!(
            scene.primitives[1].shape,
            Shape::Plane {
                normal: Vec3::Y,
                offset: 1.0
            }
        );
        assert_eq!(scene.primitives[1].material.ns, DEFAULT_NS);

        match scene.primitives[2].shape {
            Shape::Quadric { coefficients } => assert_eq!(coefficients[9], 24.0),
            other => panic!("expected quadric, got {:?}", other),
        }

        let point = &scene.lights[0];
        assert_eq!(point.kind, LightKind::Point);
        assert_eq!(point.attenuation, RadialAttenuation::new(1.0, 0.1, 0.01));

        let spot = &scene.lights[1];
        match spot.kind {
            LightKind::Spot {
                direction,
                cos_theta,
                angular_exponent,
                ..
            } => {
                assert_eq!(direction, Vec3::new(0.0, -1.0, 0.0));
                assert!((cos_theta - 30f32.to_radians().cos()).abs() < 1e-6);
                assert_eq!(angular_exponent, 2.0);
            }
            LightKind::Point => panic!("expected spot light"),
        }
    }

    #[test]
    fn test_sphere_defaults() {
        let scene = parse_scene("sphere, position: [0, 0, -3], radius: 1").unwrap();
        let material = scene.primitives[0].material;

        assert_eq!(material.ns, DEFAULT_NS);
        assert_eq!(material.diffuse_color, Color::ZERO);
        assert_eq!(material.ior, 1.0);
    }

    #[test]
    fn test_missing_camera_uses_default_viewport() {
        let scene = parse_scene("").unwrap();
        assert_eq!(scene.camera, Camera::default());
        assert_eq!(scene.primitive_count(), 0);
    }

    #[test]
    fn test_negative_and_exponent_numbers() {
        let scene = parse_scene("sphere, position: [-1.5, +2, -3e1], radius: .5").unwrap();
        assert_eq!(
            scene.primitives[0].shape,
            Shape::sphere(Vec3::new(-1.5, 2.0, -30.0), 0.5)
        );
    }

    #[test]
    fn test_unknown_kind_reports_line() {
        let err = parse_scene("camera, width: 1, height: 1\ncube, size: 2").unwrap_err();
        match err {
            ParseError::UnknownKind { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(kind, "cube");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_scene("sphere, position: [0, 0, 0], radius: 1, colour: [1, 1, 1]")
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownKey { ref key, .. } if key == "colour"));
    }

    #[test]
    fn test_missing_required_key() {
        let err = parse_scene("\n\nplane, position: [0, 0, 0]").unwrap_err();
        match err {
            ParseError::MissingKey { line, kind, key } => {
                assert_eq!(line, 3);
                assert_eq!(kind, "plane");
                assert_eq!(key, "normal");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse_scene("sphere, position: [0, 0], radius: 1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongArity {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_scalar_where_list_expected() {
        let err = parse_scene("sphere, position: 4, radius: 1").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedList { .. }));

        let err = parse_scene("sphere, position: [0, 0, 0], radius: [1, 2, 3]").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedScalar { .. }));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_scene("sphere, position: [0, 0, 1-2], radius: 1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref text, .. } if text == "1-2"));
    }

    #[test]
    fn test_duplicate_key_and_camera() {
        let err = parse_scene("sphere, position: [0, 0, 0], radius: 1, radius: 2").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { .. }));

        let err = parse_scene("camera, width: 1, height: 1\ncamera, width: 2, height: 2")
            .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateCamera { line: 2 }));
    }

    #[test]
    fn test_unexpected_character() {
        let err = parse_scene("sphere; radius: 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar { ch: ';', line: 1 }));
    }

    #[test]
    fn test_unterminated_list() {
        let err = parse_scene("sphere, position: [0, 0, 0").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn test_missing_comma_after_kind() {
        let err = parse_scene("sphere position: [0, 0, -3], radius: 1").unwrap_err();
        match err {
            ParseError::UnexpectedToken { line, found, .. } => {
                assert_eq!(line, 1);
                assert_eq!(found, "\"position\"");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_comma_between_properties() {
        let err = parse_scene("camera, width: 1\nsphere, position: [0, 0, -3]\n  radius: 1")
            .unwrap_err();
        match err {
            ParseError::UnexpectedToken {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, "',' between properties");
                assert_eq!(found, "\"radius\"");
            }
            other => panic!("unexpected error: {}", other),
        }

        let err = parse_scene("sphere, radius: 1 2").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_entities_without_separating_comma() {
        // A newline (or nothing) between entities is enough, and a trailing
        // comma or a bare kind is accepted
        let scene = parse_scene(
            "camera\n\
             sphere, position: [0, 0, -3], radius: 1,\n\
             light, position: [0, 0, 0] light, position: [1, 1, 1]",
        )
        .unwrap();
        assert_eq!(scene.primitive_count(), 1);
        assert_eq!(scene.light_count(), 2);
    }

    #[test]
    fn test_light_without_direction_is_point() {
        let scene = parse_scene("light, position: [0, 1, 0], color: [1, 1, 1], theta: 20").unwrap();
        assert_eq!(scene.lights[0].kind, LightKind::Point);
        assert_eq!(scene.lights[0].attenuation, RadialAttenuation::default());
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("/nonexistent/specula/scene.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
