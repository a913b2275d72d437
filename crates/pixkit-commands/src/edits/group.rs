//! Grouping objects and taking groups apart again.

use pixkit_core::{collective_name, ObjectId, VectorObject};
use tracing::warn;

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Z-positions of `ids` in the frame, lowest first. Missing objects are
/// skipped.
fn depths(ctx: &dyn CommandContext, ids: &[ObjectId]) -> Vec<(usize, ObjectId)> {
    let mut found: Vec<(usize, ObjectId)> = ids
        .iter()
        .filter_map(|&id| match ctx.objects().iter().position(|o| o.id() == id) {
            Some(z) => Some((z, id)),
            None => {
                warn!(object = %id, "object to regroup is missing");
                None
            }
        })
        .collect();
    found.sort_unstable_by_key(|&(z, _)| z);
    found
}

/// Replaces the members with one group placed where the topmost member was.
#[derive(Debug)]
struct GroupObjectsCommand {
    id: CommandId,
    members: Vec<ObjectId>,
    group: ObjectId,
    /// The group without its members while it is not in the frame.
    shell: Option<VectorObject>,
    /// Where the members were, lowest first.
    depths: Vec<usize>,
    name: String,
}

impl Command for GroupObjectsCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        let Some(mut shell) = self.shell.take() else {
            return;
        };
        let found = depths(ctx, &self.members);
        let Some(&(top, _)) = found.last() else {
            self.shell = Some(shell);
            return;
        };
        let mut children = Vec::with_capacity(found.len());
        for &(_, id) in found.iter().rev() {
            if let Some((_, object)) = ctx.remove_object(id) {
                children.push(object);
            }
        }
        children.reverse();
        shell.children = children;
        ctx.insert_object(top + 1 - found.len(), shell);
        self.depths = found.into_iter().map(|(z, _)| z).collect();
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        let Some((_, mut group)) = ctx.remove_object(self.group) else {
            warn!(object = %self.group, "group to dissolve is missing");
            return;
        };
        let children = std::mem::take(&mut group.children);
        for (&z, child) in self.depths.iter().zip(children) {
            ctx.insert_object(z, child);
        }
        self.shell = Some(group);
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Groups `objects` into a new group object.
///
/// Returns the command and the id the group will have.
///
/// # Panics
///
/// If `objects` is empty.
pub fn group_objects_command(objects: &[&VectorObject]) -> (Box<dyn Command>, ObjectId) {
    assert!(!objects.is_empty(), "cannot group no objects");
    let shell = VectorObject::group(Vec::new());
    let group = shell.id();
    let command = GroupObjectsCommand {
        id: CommandId::next(),
        members: objects.iter().map(|o| o.id()).collect(),
        group,
        shell: Some(shell),
        depths: Vec::new(),
        name: format!("Group {}", collective_name(objects)),
    };
    (Box::new(command), group)
}

#[derive(Debug)]
struct Ungrouped {
    depth: usize,
    shell: VectorObject,
    children: Vec<ObjectId>,
}

/// Replaces each group by its members, stacked where the group was.
#[derive(Debug)]
struct UngroupObjectsCommand {
    id: CommandId,
    groups: Vec<ObjectId>,
    /// In the order the groups were taken apart, topmost first.
    ungrouped: Vec<Ungrouped>,
}

impl Command for UngroupObjectsCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        for (_, id) in depths(ctx, &self.groups).into_iter().rev() {
            let Some((depth, mut shell)) = ctx.remove_object(id) else {
                continue;
            };
            let members = std::mem::take(&mut shell.children);
            let children = members.iter().map(VectorObject::id).collect();
            for (j, member) in members.into_iter().enumerate() {
                ctx.insert_object(depth + j, member);
            }
            self.ungrouped.push(Ungrouped {
                depth,
                shell,
                children,
            });
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        while let Some(Ungrouped {
            depth,
            mut shell,
            children,
        }) = self.ungrouped.pop()
        {
            shell.children = children
                .iter()
                .filter_map(|&id| ctx.remove_object(id).map(|(_, member)| member))
                .collect();
            ctx.insert_object(depth, shell);
        }
    }

    fn name(&self) -> String {
        "Ungroup Objects".to_string()
    }
}

/// Dissolves the given groups.
///
/// # Panics
///
/// If `groups` is empty or holds an object that is not a group.
pub fn ungroup_objects_command(groups: &[&VectorObject]) -> Box<dyn Command> {
    assert!(!groups.is_empty(), "cannot ungroup no objects");
    assert!(
        groups.iter().all(|g| g.is_group()),
        "only groups can be ungrouped"
    );
    Box::new(UngroupObjectsCommand {
        id: CommandId::next(),
        groups: groups.iter().map(|g| g.id()).collect(),
        ungrouped: Vec::new(),
    })
}
