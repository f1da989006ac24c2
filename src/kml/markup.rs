//! KML markup for a `TrackDocument`.
//!
//! The document is small and its structure fixed, so markup is
//! written directly rather than through an intermediate DOM.

use std::fmt::Write;

use crate::{
    FlightLogError,
    color::{map_velocity_to_color, Color},
    constants::SEGMENT_POLY_ALPHA,
    geo::Lla,
    track::{GeoPoint, Keyframe, Segment, TrackDocument},
};

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
pub const ARROW_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/arrow.png";
pub const ARROW_STYLE_ID: &str = "directiveArrowStyle";
pub const GROUND_TRACK_STYLE_ID: &str = "ts_2_tb";
pub const WALL_AXES_STYLE_ID: &str = "ts_1_tb";
/// The arrow icon points south.
pub const ARROW_HEADING_OFFSET: f64 = 180.0;

/// Renders the complete KML document.
pub fn render(doc: &TrackDocument) -> Result<String, FlightLogError> {
    let mut buf = String::with_capacity(1024 + doc.segments.len() * 1024);

    writeln!(buf, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(buf, r#"<kml xmlns="{KML_NAMESPACE}">"#)?;
    writeln!(buf, "<Document>")?;

    write_arrow_style(&mut buf)?;
    write_ground_track_style(&mut buf)?;
    write_wall_axes_style(&mut buf)?;

    writeln!(buf, "<Folder>")?;
    writeln!(buf, "<name>Track</name>")?;
    for segment in doc.segments.iter() {
        write_segment(&mut buf, doc, segment)?;
    }
    writeln!(buf, "</Folder>")?;

    writeln!(buf, "<Folder>")?;
    writeln!(buf, "<name>Arrows</name>")?;
    for keyframe in doc.keyframes.iter() {
        write_keyframe(&mut buf, doc, keyframe)?;
    }
    writeln!(buf, "</Folder>")?;

    writeln!(buf, "<Placemark>")?;
    writeln!(buf, "<name>Ground track</name>")?;
    writeln!(buf, "<styleUrl>#{GROUND_TRACK_STYLE_ID}</styleUrl>")?;
    writeln!(buf, "<MultiGeometry>")?;
    write_line_string(&mut buf, &doc.ground_track, false, "clampToGround")?;
    writeln!(buf, "</MultiGeometry>")?;
    writeln!(buf, "</Placemark>")?;

    writeln!(buf, "<Folder>")?;
    writeln!(buf, "<name>Wall axes</name>")?;
    for axis in doc.wall_axes.iter() {
        writeln!(buf, "<Placemark>")?;
        writeln!(buf, "<styleUrl>#{WALL_AXES_STYLE_ID}</styleUrl>")?;
        writeln!(buf, "<MultiGeometry>")?;
        write_line_string(&mut buf, axis, false, "absolute")?;
        writeln!(buf, "</MultiGeometry>")?;
        writeln!(buf, "</Placemark>")?;
    }
    writeln!(buf, "</Folder>")?;

    writeln!(buf, "</Document>")?;
    writeln!(buf, "</kml>")?;

    Ok(buf)
}

/// Placemark description for a track point.
pub fn description(point: &GeoPoint, airspeed: f64) -> String {
    format!("Latitude: {:.7} deg\nLongitude: {:.7} deg\nAltitude: {:.2} m\nAirspeed: {:.2} m/s\nGroundspeed: {:.2} m/s\n",
        point.latitude,
        point.longitude,
        point.altitude,
        airspeed,
        point.groundspeed
    )
}

/// `lon,lat,alt` tuples, space separated.
fn coordinates(points: &[Lla]) -> String {
    points.iter()
        .map(|p| format!("{},{},{}", p.longitude, p.latitude, p.altitude))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_line_string(buf: &mut String, points: &[Lla], extrude: bool, altitude_mode: &str) -> std::fmt::Result {
    writeln!(buf, "<LineString>")?;
    writeln!(buf, "<extrude>{}</extrude>", extrude as u8)?;
    writeln!(buf, "<altitudeMode>{altitude_mode}</altitudeMode>")?;
    writeln!(buf, "<coordinates>{}</coordinates>", coordinates(points))?;
    writeln!(buf, "</LineString>")
}

fn write_segment(buf: &mut String, doc: &TrackDocument, segment: &Segment) -> Result<(), FlightLogError> {
    let time = doc.datetime_string(segment.timestamp)?;
    let velocity = segment.groundspeed();
    let line = map_velocity_to_color(velocity, 255);
    let poly = line.with_alpha(SEGMENT_POLY_ALPHA);

    writeln!(buf, "<Placemark>")?;
    writeln!(buf, "<name>{time}</name>")?;
    writeln!(buf, "<visibility>1</visibility>")?;
    writeln!(buf, "<description>{}</description>", description(&segment.end, segment.airspeed))?;
    writeln!(buf, "<TimeSpan><begin>{time}</begin><end>{time}</end></TimeSpan>")?;
    writeln!(buf, "<StyleMap>")?;
    for (key, fill) in [("normal", true), ("highlight", false)] {
        writeln!(buf, "<Pair>")?;
        writeln!(buf, "<key>{key}</key>")?;
        writeln!(buf, "<Style>")?;
        writeln!(buf, "<LineStyle><color>{line}</color></LineStyle>")?;
        match fill {
            true => writeln!(buf, "<PolyStyle><color>{poly}</color></PolyStyle>")?,
            false => writeln!(buf, "<PolyStyle><color>{poly}</color><fill>0</fill></PolyStyle>")?,
        }
        writeln!(buf, "<BalloonStyle><text>$[description]</text></BalloonStyle>")?;
        writeln!(buf, "</Style>")?;
        writeln!(buf, "</Pair>")?;
    }
    writeln!(buf, "</StyleMap>")?;
    write_line_string(buf, &[segment.start.to_lla(), segment.end.to_lla()], true, "absolute")?;
    writeln!(buf, "</Placemark>")?;

    Ok(())
}

fn write_keyframe(buf: &mut String, doc: &TrackDocument, keyframe: &Keyframe) -> Result<(), FlightLogError> {
    let begin = doc.datetime_string(keyframe.interval_start)?;
    let end = doc.datetime_string(keyframe.interval_end)?;
    let point = &keyframe.point;

    writeln!(buf, "<Placemark>")?;
    writeln!(buf, "<name>{}</name>", keyframe.interval_end as f64 / 1000.0)?;
    writeln!(buf, "<visibility>1</visibility>")?;
    writeln!(buf, "<description>{}</description>", description(point, keyframe.airspeed))?;
    writeln!(buf, "<TimeSpan><begin>{begin}</begin><end>{end}</end></TimeSpan>")?;
    writeln!(buf, "<styleUrl>#{ARROW_STYLE_ID}</styleUrl>")?;
    writeln!(buf, "<Style>")?;
    writeln!(buf, "<IconStyle><color>{}</color><heading>{}</heading></IconStyle>",
        map_velocity_to_color(keyframe.airspeed, 255),
        keyframe.heading + ARROW_HEADING_OFFSET
    )?;
    // legs connecting the point to the ground
    writeln!(buf, "<LineStyle><color>{}</color></LineStyle>",
        map_velocity_to_color(point.groundspeed, 255))?;
    writeln!(buf, "</Style>")?;
    writeln!(buf, "<Point>")?;
    writeln!(buf, "<extrude>1</extrude>")?;
    writeln!(buf, "<altitudeMode>absolute</altitudeMode>")?;
    writeln!(buf, "<coordinates>{}</coordinates>", coordinates(&[point.to_lla()]))?;
    writeln!(buf, "</Point>")?;
    writeln!(buf, "</Placemark>")?;

    Ok(())
}

/// Shared style for keyframe arrows. `$[description]` as balloon text
/// drops the default "Directions to here" links.
fn write_arrow_style(buf: &mut String) -> std::fmt::Result {
    writeln!(buf, r#"<StyleMap id="{ARROW_STYLE_ID}">"#)?;
    for (key, label_scale, line_width) in [("normal", 0.75, 3.25), ("highlight", 0.9, 6.5)] {
        writeln!(buf, "<Pair>")?;
        writeln!(buf, "<key>{key}</key>")?;
        writeln!(buf, "<Style>")?;
        writeln!(buf, "<IconStyle><scale>0.65</scale><Icon><href>{ARROW_ICON}</href></Icon></IconStyle>")?;
        writeln!(buf, "<LabelStyle><color>{}</color><scale>{label_scale}</scale></LabelStyle>", Color::YELLOW)?;
        writeln!(buf, "<LineStyle><width>{line_width}</width></LineStyle>")?;
        writeln!(buf, "<BalloonStyle><text>$[description]</text></BalloonStyle>")?;
        writeln!(buf, "</Style>")?;
        writeln!(buf, "</Pair>")?;
    }
    writeln!(buf, "</StyleMap>")
}

fn write_ground_track_style(buf: &mut String) -> std::fmt::Result {
    writeln!(buf, r#"<Style id="{GROUND_TRACK_STYLE_ID}">"#)?;
    write_hidden_label_style(buf, 0.0, 9.0)?;
    writeln!(buf, "</Style>")
}

fn write_wall_axes_style(buf: &mut String) -> std::fmt::Result {
    writeln!(buf, r#"<StyleMap id="{WALL_AXES_STYLE_ID}">"#)?;
    for (key, label_scale, line_width) in [("normal", 0.0, 0.9), ("highlight", 0.75, 1.8)] {
        writeln!(buf, "<Pair>")?;
        writeln!(buf, "<key>{key}</key>")?;
        writeln!(buf, "<Style>")?;
        write_hidden_label_style(buf, label_scale, line_width)?;
        writeln!(buf, "</Style>")?;
        writeln!(buf, "</Pair>")?;
    }
    writeln!(buf, "</StyleMap>")
}

/// Black line, no icon.
fn write_hidden_label_style(buf: &mut String, label_scale: f64, line_width: f64) -> std::fmt::Result {
    writeln!(buf, "<IconStyle><scale>0</scale></IconStyle>")?;
    writeln!(buf, "<LabelStyle><color>{}</color><scale>{label_scale}</scale></LabelStyle>", Color::YELLOW)?;
    writeln!(buf, "<LineStyle><color>{}</color><width>{line_width}</width></LineStyle>", Color::BLACK)?;
    writeln!(buf, "<BalloonStyle><text>$[id]</text></BalloonStyle>")
}
